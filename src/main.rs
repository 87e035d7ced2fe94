//! Relink - repair cross-references in a static tree of HTML documents.

mod cli;

use clap::Parser;
use std::process::ExitCode;
use cli::Cli;
use relink::{RelinkConfig, RunReport, log};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = RelinkConfig::load(&cli.root()).and_then(|config| {
        if let Some(path) = &config.config_path {
            log!("config"; "using {}", path.display());
        }
        relink::run(&config)
    });

    match result {
        Ok(report) => {
            summarize(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(report: &RunReport) {
    for (doc, reason) in report.skipped() {
        log!("warn"; "skipped {}: {reason}", doc.display());
    }
    for (doc, href) in report.unresolved() {
        log!("warn"; "unresolved '{href}' in {}", doc.display());
    }
    for (doc, ambiguity) in report.ambiguities() {
        log!("warn"; "ambiguous '{}' in {} resolved to {}",
            ambiguity.href, doc.display(), ambiguity.chosen.display());
    }
    log!(
        "done";
        "{} documents, {} rewritten: {} links, {} images, {} structural edits",
        report.processed(),
        report.rewritten().count(),
        report.links_fixed(),
        report.images_fixed(),
        report.structural_edits()
    );
}
