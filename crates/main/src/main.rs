use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plantation_report::model::Page;
use plantation_report::{Report, ReportConfig};

/// Renders the Sri Lanka plantation sectors report.
///
/// Fonts are looked up under `assets/fonts` (or `PLANTATION_REPORT_FONTS_DIR`) and images
/// under `assets` (or `PLANTATION_REPORT_ASSETS_DIR`); the flags below take precedence.
#[derive(Parser)]
#[command(author, version, about = "Render the plantation sectors infographic to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report to a PDF file.
    Render(RenderArgs),

    /// Render the report and open it in the default viewer for printing.
    Print(RenderArgs),

    /// List the pages in print order with their numbers and sources.
    Pages,
}

#[derive(Args)]
struct RenderArgs {
    /// Output file.
    #[arg(short, long, default_value = "report.pdf")]
    output: PathBuf,

    /// Directory holding the image assets.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Directory holding the Roboto font files.
    #[arg(long, value_name = "DIR")]
    fonts: Option<PathBuf>,

    /// Resolution of the rasterised charts.
    #[arg(long, value_name = "DPI")]
    dpi: Option<f64>,

    /// Add a PDF outline with one entry per page.
    #[arg(long)]
    bookmarks: bool,
}

impl RenderArgs {
    fn config(&self) -> ReportConfig {
        let mut config = ReportConfig::from_env().with_bookmarks(self.bookmarks);
        if let Some(assets) = &self.assets {
            config = config.with_assets_dir(assets);
        }
        if let Some(fonts) = &self.fonts {
            config = config.with_fonts_dir(fonts);
        }
        if let Some(dpi) = self.dpi {
            config = config.with_chart_dpi(dpi);
        }
        config
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => render(&args).map(|_| ()),
        Commands::Print(args) => print(&args),
        Commands::Pages => {
            list_pages(Report::standard().pages());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render(args: &RenderArgs) -> Result<PathBuf, Box<dyn Error>> {
    let prepared = Report::standard().prepare(&args.config())?;
    let pdf = prepared.render_to_file(&args.output)?;
    println!(
        "Generated {} ({} pages, {} bytes)",
        args.output.display(),
        pdf.page_count,
        pdf.bytes.len()
    );
    Ok(args.output.clone())
}

fn print(args: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let path = render(args)?;
    open::that(&path)
        .map_err(|err| format!("Failed to open {} in the default viewer: {}", path.display(), err))?;
    Ok(())
}

fn list_pages(pages: &[Page]) {
    for (index, page) in pages.iter().enumerate() {
        let number = page
            .number()
            .map(|number| format!("page {}", number))
            .unwrap_or_else(|| "unnumbered".to_string());
        println!("{}. {} ({})", index + 1, page.title(), number);
        for line in page.citation_lines() {
            println!("     source: {}", line);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
