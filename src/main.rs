use skycurator::config::SkyMapConfig;
use skycurator::core::app::App;
use skycurator::core::runtime::Session;
use skycurator::core::scan::HttpScanClient;
use skycurator::session::{Msg, ScanStatus};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = SkyMapConfig::load();
    let client = HttpScanClient::new(&config.backend_url);
    let view = config.initial_view;
    let snapshot_path = config.snapshot_path.clone();

    let mut session = Session::new(App::new(config), client);
    session.dispatch(Msg::SubmitView(view));
    session.settle().await;

    let app = session.into_app();
    let status = app.state().status();
    println!("{}", status.message());
    if *status == ScanStatus::Failed {
        log::warn!("No scan result to draw, writing the empty field");
    }

    app.surface().save_png(&snapshot_path)?;
    log::info!("Sky map written to {}", snapshot_path.display());
    Ok(())
}
