use clap::Parser;
use portal_loader::config::cli::{Command, Settings};
use portal_loader::core::bundle::BundleValues;
use portal_loader::utils::{logger, validation::Validate};
use portal_loader::{
    AdsCarousel, CliConfig, LoadOutcome, Loader, LocalStorage, Page, PackagesTable,
    PortalBundler,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting portal-loader");
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.portal.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match cli.command() {
        Command::Render => render(&settings).await?,
        Command::Bundle {
            template,
            output,
            name,
            support_phone,
        } => {
            let support_phone = support_phone.or_else(|| settings.support_phone.clone());
            bundle(&settings, &template, &output, name, support_phone).await?
        }
    }

    Ok(())
}

async fn render(settings: &Settings) -> anyhow::Result<()> {
    let ads_id = settings.targets.ads_container();
    let table_id = settings.targets.packages_table();
    let mut page = Page::portal_with(ads_id, table_id);

    let mut ads = Loader::new(
        AdsCarousel::with_container_id(ads_id),
        settings.portal.clone(),
    )?;
    let mut packages = Loader::new(
        PackagesTable::with_table_id(table_id),
        settings.portal.clone(),
    )?;

    let ads_outcome = ads.load(&mut page).await;
    let packages_outcome = packages.load(&mut page).await;

    println!("{}", page.to_html());
    report("ads", &ads_outcome);
    report("packages", &packages_outcome);

    Ok(())
}

fn report(name: &str, outcome: &LoadOutcome) {
    match outcome.error() {
        Some(e) => eprintln!("⚠️  {}: {} ({})", name, outcome, e.recovery_suggestion()),
        None => eprintln!("✅ {}: {}", name, outcome),
    }
}

async fn bundle(
    settings: &Settings,
    template: &Path,
    output: &Path,
    name: Option<String>,
    support_phone: Option<String>,
) -> anyhow::Result<()> {
    // The storage root is the output directory; an absolute template path
    // still resolves because joining an absolute path replaces the base.
    let template = std::fs::canonicalize(template)?;
    std::fs::create_dir_all(output)?;

    let values = BundleValues::from_config(&settings.portal, support_phone.as_deref());
    let label = name.unwrap_or_else(|| settings.portal.location_id.clone());

    let storage = LocalStorage::new(output);
    let bundler = PortalBundler::new(storage.clone());
    let file_name = bundler
        .bundle(&template.to_string_lossy(), &values, &label)
        .await?;

    println!(
        "📁 Portal bundle saved to: {}",
        storage.base_path().join(file_name).display()
    );
    Ok(())
}
