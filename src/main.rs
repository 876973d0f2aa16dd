mod config;
mod data;
mod error;
mod render;
mod report;

use std::io::Write;
use std::process::ExitCode;

use config::ReportConfig;
use render::raster::RasterBackend;
use render::Renderer;
use report::Report;

fn main() -> ExitCode {
    // Plain progress notices on stdout; RUST_LOG still adjusts verbosity.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let config = ReportConfig::default();
    let renderer = Renderer::from_probe(RasterBackend::discover(&config));

    let (status, summary) = Report::new(config, renderer).run();
    log::debug!(
        "{} plot(s) written, {} file(s) skipped",
        summary.written.len(),
        summary.skipped.len()
    );
    status.into()
}
