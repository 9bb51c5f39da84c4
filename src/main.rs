use anyhow::Context;
use news_scout::{
    configuration::get_configuration,
    error::ScoutError,
    services::{run_session, HttpDownloader, NewsSession, SessionOptions, WebDriverBrowser},
    telemetry::init_logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration.")?;
    init_logger(configuration.output.log_file_path().as_deref())
        .context("Failed to set up logging.")?;

    log::info!(
        "Starting news search for \"{}\" in \"{}\"",
        configuration.search.phrase,
        configuration.search.category
    );

    let browser = WebDriverBrowser::open(&configuration.browser)
        .await
        .context("Failed to open browser")?;
    let downloader = HttpDownloader::new(&configuration.browser.site_url)
        .context("Failed to build picture downloader")?;

    let mut session = NewsSession::new(
        browser,
        downloader,
        configuration.locators.clone(),
        SessionOptions::from_settings(&configuration),
    );

    let workbook_path = configuration.output.workbook_path();
    match run_session(
        &mut session,
        &configuration.search.phrase,
        &configuration.search.category,
        &workbook_path,
    )
    .await
    {
        Ok(count) => {
            log::info!(
                "News search completed, {} articles saved to {}",
                count,
                workbook_path.display()
            );
            Ok(())
        }
        Err(e @ ScoutError::NoResults { .. }) => {
            log::warn!("{}", e);
            Ok(())
        }
        Err(e) => {
            log::error!("News search failed: {:?}", e);
            Err(e).context("News search failed")
        }
    }
}
