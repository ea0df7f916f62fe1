use clap::Parser;
use pdf_harvest::{HarvestSession, Harvester, Progress, report};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.harvest_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let harvester = match Harvester::new(config) {
        Ok(harvester) => harvester,
        Err(e) => {
            ::log::error!("Failed to set up harvester: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!("Scanning page: {}", args.url);

    let session = match harvester.scan(&args.url).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error fetching the page: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for anomaly in &session.anomalies {
        ::log::warn!("{}", anomaly);
    }

    print_listing(&session, args.json);

    if session.is_empty() {
        return ExitCode::SUCCESS;
    }

    if let Some(path) = &args.save_list {
        match report::write_listing(&session.links, path) {
            Ok(()) => println!("\nPDF links saved to: {}", path.display()),
            Err(e) => eprintln!("Error saving to file: {}", e),
        }
    }

    if let Some(dir) = args.download_target(harvester.config()) {
        println!(
            "\nDownloading {} PDF file(s) to '{}'...\n",
            session.links.len(),
            dir.display()
        );
        match harvester.download(&session, &dir, print_progress).await {
            Ok(batch) => print!("\n{}", report::render_summary(&batch)),
            Err(e) => eprintln!("Cannot use download directory {}: {}", dir.display(), e),
        }
    }

    if let Some(path) = &args.zip {
        println!("\nDownloading files and creating ZIP...\n");
        match harvester.bundle(&session, print_progress).await {
            Ok(bundle) => match tokio::fs::write(path, &bundle.bytes).await {
                Ok(()) => println!(
                    "\nZIP ready! Contains {} valid files: {}",
                    bundle.written,
                    path.display()
                ),
                Err(e) => eprintln!("Error writing {}: {}", path.display(), e),
            },
            Err(e) => eprintln!("Error creating ZIP archive: {}", e),
        }
    }

    ExitCode::SUCCESS
}

fn print_listing(session: &HarvestSession, json: bool) {
    if json {
        match serde_json::to_string_pretty(&session.links) {
            Ok(out) => println!("{}", out),
            Err(e) => ::log::error!("Failed to serialize links: {}", e),
        }
    } else {
        print!("{}", report::render_display(&session.links));
    }
}

fn print_progress(progress: &Progress<'_>) {
    println!(
        "[{}/{}] Downloading: {}",
        progress.index, progress.total, progress.link.filename
    );
}
