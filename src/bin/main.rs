//! Text Component CLI
//!
//! Check, format and wrap Minecraft text components.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use text_component::{
    load_resource_pack, stringify, BitmapFontMetrics, Dialect, FontMetrics, LayoutConfig,
    MonospaceMetrics, TextElement, TextLayouter, UnicodeNameTable,
};

#[derive(Parser)]
#[command(name = "text-component")]
#[command(author, version, about = "Check, format and wrap Minecraft text components", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a component and report the first error
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Parse a component and print it in canonical form
    Format {
        #[command(flatten)]
        input: InputArgs,

        /// Write for this Minecraft version instead of the input's
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Wrap a component into lines and print them as JSON
    Wrap {
        #[command(flatten)]
        input: InputArgs,

        /// Path to resource pack (ZIP or directory) providing the fonts
        #[arg(short, long)]
        resource_pack: Option<PathBuf>,

        /// Maximum line width in pixels
        #[arg(short, long, default_value = "200")]
        line_width: u32,

        /// Glyph advance used when no resource pack is given
        #[arg(long, default_value = "6")]
        advance: u32,

        /// Print only the text of each line
        #[arg(long)]
        plain: bool,
    },

    /// List the fonts of a resource pack
    Fonts {
        /// Path to resource pack (ZIP or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Component source; read from --file or stdin when omitted
    source: Option<String>,

    /// Read the component from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Minecraft version the component is written for
    #[arg(short = 'm', long = "mc-version", default_value = "1.21.5")]
    mc_version: String,

    /// UnicodeData.txt used to resolve \N{NAME} escapes
    #[arg(long)]
    unicode_data: Option<PathBuf>,
}

impl InputArgs {
    fn dialect(&self) -> Result<Dialect, Box<dyn std::error::Error>> {
        Ok(Dialect::from_version(&self.mc_version)?)
    }

    fn source(&self) -> Result<String, Box<dyn std::error::Error>> {
        if let Some(source) = &self.source {
            return Ok(source.clone());
        }
        if let Some(path) = &self.file {
            return Ok(fs::read_to_string(path)?);
        }
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    }

    fn parse(&self) -> Result<TextElement, Box<dyn std::error::Error>> {
        let source = self.source()?;
        let source = source.trim_end_matches(['\n', '\r']);
        let dialect = self.dialect()?;

        let names = match &self.unicode_data {
            Some(path) => Some(UnicodeNameTable::load(path)?),
            None => None,
        };
        let mut parser = text_component::Parser::new(source, dialect);
        if let Some(names) = &names {
            parser = parser.with_names(names);
        }
        Ok(parser.parse()?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input } => {
            check(&input)?;
        }
        Commands::Format { input, to } => {
            format_component(&input, to.as_deref())?;
        }
        Commands::Wrap {
            input,
            resource_pack,
            line_width,
            advance,
            plain,
        } => {
            let config = LayoutConfig::new().with_line_width(line_width);
            match resource_pack {
                Some(path) => {
                    let pack = load_resource_pack(&path)?;
                    let metrics = BitmapFontMetrics::from_resource_pack(&pack);
                    wrap_component(&input, TextLayouter::with_config(metrics, config), plain)?;
                }
                None => {
                    let metrics = MonospaceMetrics::new(advance);
                    wrap_component(&input, TextLayouter::with_config(metrics, config), plain)?;
                }
            }
        }
        Commands::Fonts { resource_pack } => {
            show_fonts(&resource_pack)?;
        }
    }

    Ok(())
}

fn check(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    match input.parse() {
        Ok(_) => {
            println!("OK ({})", input.dialect()?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn format_component(input: &InputArgs, to: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let element = input.parse()?;
    let dialect = match to {
        Some(version) => Dialect::from_version(version)?,
        None => input.dialect()?,
    };
    println!("{}", stringify(&element, dialect)?);
    Ok(())
}

fn wrap_component<M: FontMetrics>(
    input: &InputArgs,
    layouter: TextLayouter<M>,
    plain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let element = input.parse()?;
    let wrapped = layouter.layout(&element);

    if plain {
        for line in &wrapped.lines {
            println!("{:>4}px  {}", line.width, line.text());
        }
        println!("background: {}px", wrapped.background_width);
    } else {
        println!("{}", serde_json::to_string_pretty(&wrapped)?);
    }
    Ok(())
}

fn show_fonts(resource_pack_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading resource pack from {:?}...", resource_pack_path);
    let pack = load_resource_pack(resource_pack_path)?;

    println!("\nResource Pack Info:");
    println!("  Fonts: {}", pack.font_count());
    println!("  Font textures: {}", pack.texture_count());

    for font in pack.font_ids() {
        let providers = pack.get_font(&font).map_or(0, |f| f.providers.len());
        println!("  - {} ({} providers)", font, providers);
    }

    Ok(())
}
