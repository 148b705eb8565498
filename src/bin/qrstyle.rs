use clap::{Args, Parser, Subcommand};
use image::Rgba;
use qr_style::plausibility::assess;
use qr_style::tools::{dark_stats, load_rgba, read_bytes, save_png};
use qr_style::utils::binarization::DarkClassifier;
use qr_style::utils::color::parse_hex_color;
use qr_style::{
    Contact, ECLevel, EyeShape, FrameSpec, GradientKind, GradientSpec, LogoSpec, ModuleShape,
    RenderOptions, Renderer, StyleRequest, WifiSecurity, build_mailto_payload,
    build_vcard_payload, build_wifi_payload,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrstyle", version, about = "Styled QR code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render text as a styled QR code PNG
    Render {
        text: String,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Build a Wi-Fi join payload, optionally rendering it
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "WPA")]
        security: WifiSecurity,
        #[arg(long)]
        hidden: bool,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Build a vCard payload, optionally rendering it
    Vcard {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        org: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Build a mailto payload, optionally rendering it
    Mailto {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Check that the finder corners of a rendered PNG look intact
    Check {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        modules: usize,
        #[arg(long)]
        quiet_zone_px: u32,
        #[arg(long, default_value_t = 0)]
        caption_px: u32,
        /// Foreground colour the image was drawn with (needs --light)
        #[arg(long, value_parser = parse_hex_color, requires = "light")]
        dark: Option<Rgba<u8>>,
        /// Background colour the image was drawn with (needs --dark)
        #[arg(long, value_parser = parse_hex_color, requires = "dark")]
        light: Option<Rgba<u8>>,
    },
}

#[derive(Args)]
struct StyleArgs {
    /// Module glyph
    #[arg(long, default_value = "square")]
    shape: ModuleShape,
    /// Finder eye shape
    #[arg(long, default_value = "square")]
    eye: EyeShape,
    /// Error correction level (L, M, Q, H)
    #[arg(long, default_value = "M")]
    ec: ECLevel,
    #[arg(long, default_value_t = 10)]
    module_px: u32,
    #[arg(long, default_value_t = 4)]
    margin: u32,
    #[arg(long, default_value = "#000000", value_parser = parse_hex_color)]
    dark: Rgba<u8>,
    #[arg(long, default_value = "#ffffff", value_parser = parse_hex_color)]
    light: Rgba<u8>,
    /// Gradient stops, e.g. --gradient "#ff0000,#0000ff"
    #[arg(long, value_delimiter = ',', value_parser = parse_hex_color)]
    gradient: Vec<Rgba<u8>>,
    #[arg(long, default_value = "linear")]
    gradient_kind: GradientKind,
    #[arg(long, default_value_t = 0.0)]
    angle: f32,
    /// Logo image file
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Logo size as a percentage of the image (5-30)
    #[arg(long, default_value_t = 20.0)]
    logo_size: f32,
    /// Caption text drawn above the code
    #[arg(long)]
    caption: Option<String>,
    /// TrueType/OpenType font for the caption
    #[arg(long)]
    font: Option<PathBuf>,
}

impl StyleArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            ec_level: self.ec,
            module_px: self.module_px,
            margin_modules: self.margin,
            dark: self.dark,
            light: self.light,
            ..RenderOptions::default()
        }
    }

    fn request(&self) -> qr_style::Result<StyleRequest> {
        let gradient = if self.gradient.is_empty() {
            None
        } else {
            Some(GradientSpec {
                kind: self.gradient_kind,
                colors: self.gradient.clone(),
                angle_degrees: self.angle,
            })
        };
        let logo = match &self.logo {
            Some(path) => {
                let mut spec = LogoSpec::new(read_bytes(path)?);
                spec.size_percent = self.logo_size;
                Some(spec)
            }
            None => None,
        };
        let frame = match &self.caption {
            Some(text) => {
                let mut spec = FrameSpec::new(text.clone());
                spec.text_color = self.dark;
                spec.background_color = self.light;
                spec.font = self.font.as_deref().map(read_bytes).transpose()?;
                Some(spec)
            }
            None => None,
        };
        Ok(StyleRequest {
            shape: self.shape,
            eye_shape: self.eye,
            gradient,
            logo,
            frame,
        })
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render { text, out, style } => render_cmd(&text, &out, &style),
        Command::Wifi {
            ssid,
            password,
            security,
            hidden,
            out,
            style,
        } => {
            let payload = build_wifi_payload(&ssid, &password, security, hidden);
            payload_cmd(&payload, out.as_deref(), &style)
        }
        Command::Vcard {
            first_name,
            last_name,
            org,
            phone,
            email,
            url,
            address,
            out,
            style,
        } => {
            let contact = Contact {
                first_name,
                last_name,
                organization: org,
                phone,
                email,
                website: url,
                address,
            };
            build_vcard_payload(&contact)
                .and_then(|payload| payload_cmd(&payload, out.as_deref(), &style))
        }
        Command::Mailto {
            email,
            subject,
            body,
            out,
            style,
        } => {
            let payload = build_mailto_payload(&email, &subject, &body);
            payload_cmd(&payload, out.as_deref(), &style)
        }
        Command::Check {
            image,
            modules,
            quiet_zone_px,
            caption_px,
            dark,
            light,
        } => {
            let classifier = match dark.zip(light) {
                Some((dark, light)) => DarkClassifier::palette(dark, light),
                None => DarkClassifier::configured(),
            };
            check_cmd(&image, modules, quiet_zone_px, caption_px, classifier)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_cmd(text: &str, out: &Path, style: &StyleArgs) -> qr_style::Result<()> {
    let renderer = Renderer::new(style.options());
    let request = style.request()?;

    let start = Instant::now();
    let (image, telemetry) = renderer.render_with_telemetry(text, &request)?;
    let elapsed = start.elapsed();
    save_png(&image, out)?;

    println!(
        "Wrote {} ({}x{}, version {}, {} modules styled as {}) in {:.2?}",
        out.display(),
        image.width(),
        image.height(),
        image.version,
        telemetry.styled_modules,
        request.shape,
        elapsed
    );
    for skipped in &telemetry.skipped {
        println!("  skipped: {skipped}");
    }
    Ok(())
}

fn payload_cmd(payload: &str, out: Option<&Path>, style: &StyleArgs) -> qr_style::Result<()> {
    match out {
        Some(out) => render_cmd(payload, out, style),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn check_cmd(
    path: &Path,
    modules: usize,
    quiet_zone_px: u32,
    caption_px: u32,
    classifier: DarkClassifier,
) -> qr_style::Result<()> {
    let image = load_rgba(path)?;
    let stats = dark_stats(&image);
    println!("Image: {} ({}x{})", path.display(), image.width(), image.height());
    println!(
        "Dark pixels: {} of {} ({:.2}%)",
        stats.dark_pixels,
        stats.total_pixels,
        stats.dark_ratio * 100.0
    );

    let report = assess(&image, modules, quiet_zone_px, caption_px, classifier)?;
    let corners = ["top-left", "top-right", "bottom-left"];
    for (corner, ratio) in corners.iter().zip(report.dark_ratios) {
        println!("  {corner:<12} dark ratio {ratio:.3}");
    }
    println!(
        "Finder corners {} (advisory only, the payload is not decoded)",
        if report.plausible { "look intact" } else { "look damaged" }
    );
    Ok(())
}
