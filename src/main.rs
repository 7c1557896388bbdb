use std::{
    io::{self, Write},
    process,
    sync::Arc,
    time::Duration,
};

use folio::{
    application::{
        blog::BlogService,
        error::AppError,
        render::{
            RenderPipelineConfig, RenderRequest, RenderService, configure_render_service,
            render_service,
        },
    },
    config,
    infra::{
        content::{ContentLoader, InMemoryPostsRepo},
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) =
        config::load_with_cli().map_err(|err| InfraError::configuration(err.to_string()))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;
    configure_render_service(RenderPipelineConfig::from(&settings.render))
        .map_err(|err| AppError::unexpected(err.to_string()))?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Check(args) => run_check(settings, args).await,
        config::Command::Render(args) => run_render(args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let loader = ContentLoader::new(&settings.content.directory, render_service());
    let report = loader.load().await?;

    let repo = InMemoryPostsRepo::new(report.posts);
    info!(
        target = "folio::serve",
        published = repo.len(),
        skipped = report.diagnostics.len(),
        "post repository ready"
    );

    let state = HttpState {
        blog: Arc::new(BlogService::new(Arc::new(repo))),
    };
    serve_http(&settings, state).await
}

async fn run_check(settings: config::Settings, args: config::CheckArgs) -> Result<(), AppError> {
    let loader = ContentLoader::new(&settings.content.directory, render_service());
    let report = loader.load().await?;

    let published = report.posts.iter().filter(|post| post.published).count();
    info!(
        target = "folio::check",
        root = %loader.root().display(),
        loaded = report.posts.len(),
        published,
        skipped = report.diagnostics.len(),
        "content check finished"
    );

    if args.strict && !report.diagnostics.is_empty() {
        return Err(AppError::validation(format!(
            "{} content document(s) skipped",
            report.diagnostics.len()
        )));
    }

    Ok(())
}

async fn run_render(args: config::RenderArgs) -> Result<(), AppError> {
    let markdown = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(InfraError::from)?;
    let slug = args
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let request = RenderRequest::new(slug, markdown);
    let service = render_service();
    let html = if args.no_sanitize {
        service.render_unsanitized(&request)?
    } else {
        service.render(&request)?.html
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(html.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(InfraError::from)?;

    Ok(())
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "folio::serve",
        addr = %settings.server.addr,
        "listening"
    );

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal());

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        () = shutdown_deadline(settings.server.graceful_shutdown) => {
            warn!(
                target = "folio::serve",
                timeout_secs = settings.server.graceful_shutdown.as_secs(),
                "graceful shutdown timed out; dropping open connections"
            );
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "folio::serve", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target = "folio::serve", "shutdown requested");
}

async fn shutdown_deadline(grace: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}
