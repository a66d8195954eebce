use clap::Parser;
use floor_plan::config::toml_config::TomlConfig;
use floor_plan::core::snapshot::load_snapshot;
use floor_plan::core::{ConfigProvider, RandomSource, Storage};
use floor_plan::render::render_svg;
use floor_plan::utils::error::{ErrorSeverity, LayoutError};
use floor_plan::utils::logger;
use floor_plan::{
    Canvas, CliConfig, LayoutEngine, LocalStorage, LogFormat, PositionGenerator, RngSource,
    Snapshot, TransitionController, ZoneCatalog,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting floor-plan");
    tracing::debug!("CLI config: {:?}", cli);

    // 先合併設定檔與命令列參數，再驗證
    let (config, file_catalog) = match floor_plan::config::resolve(&cli) {
        Ok(resolved) => resolved,
        Err(e) => exit_with(&e),
    };
    let catalog = file_catalog.as_ref().unwrap_or_else(|| ZoneCatalog::standard());

    let result = run(&cli, &config, catalog).await;

    if let Err(e) = result {
        exit_with(&e);
    }
}

async fn run(cli: &CliConfig, config: &TomlConfig, catalog: &ZoneCatalog) -> floor_plan::Result<()> {
    let canvas = Canvas::from_config(config)?;
    tracing::info!(
        "Canvas {}x{} (margin {}), {} zones, swap after {:?}",
        canvas.width(),
        canvas.height(),
        canvas.margin(),
        catalog.len(),
        config.transition_delay()
    );

    let input = LocalStorage::new(".");
    let initial = load_snapshot(&input, &cli.initial).await?;
    let updated = load_snapshot(&input, &cli.updated).await?;

    let engine = LayoutEngine::new(catalog, PositionGenerator::new(canvas));
    let output = LocalStorage::new(&cli.output_path);
    let mut rng: Box<dyn RandomSource> = match config.seed() {
        Some(seed) => {
            tracing::debug!("Using seeded random source ({})", seed);
            Box::new(RngSource::seeded(seed))
        }
        None => Box::new(RngSource::thread()),
    };

    let mut transition = TransitionController::activate(initial, updated, config.transition_delay());
    write_layout(&output, "initial", &engine, &transition.current(), rng.as_mut()).await?;

    if !transition.wait_for_swap_or(tokio::signal::ctrl_c()).await {
        tracing::warn!("Interrupted before the transition, updated layout not rendered");
        return Ok(());
    }

    write_layout(&output, "updated", &engine, &transition.current(), rng.as_mut()).await?;
    println!("✅ Layouts written to: {}", output.base_path().display());
    Ok(())
}

async fn write_layout(
    output: &LocalStorage,
    name: &str,
    engine: &LayoutEngine<'_>,
    snapshot: &Snapshot,
    rng: &mut dyn RandomSource,
) -> floor_plan::Result<()> {
    let placements = engine.layout(snapshot, rng);
    let svg = render_svg(engine.generator().canvas(), engine.catalog(), &placements);

    output.write_file(&format!("{}.svg", name), svg.as_bytes()).await?;
    output
        .write_file(&format!("{}.json", name), &serde_json::to_vec_pretty(&placements)?)
        .await?;

    tracing::info!(
        "📁 {} layout: placed {} of {} entities",
        name,
        placements.len(),
        snapshot.len()
    );
    Ok(())
}

fn exit_with(e: &LayoutError) -> ! {
    tracing::error!(
        "❌ floor-plan failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
