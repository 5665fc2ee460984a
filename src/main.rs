use clap::Parser;
use cli::Cli;
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, PoisonError,
    },
};
use wayrender::{
    load_drawables_from_geojson, render, size::Size, CoordBufferPool, GeoJsonLoadError,
    JoinOptions, LineLayer, RenderError, RenderRequest,
};

mod cli;

#[derive(Debug, thiserror::Error)]
enum ReError {
    #[error(transparent)]
    LoadError(#[from] GeoJsonLoadError),

    #[error(transparent)]
    RenderError(#[from] RenderError),

    #[error("write {path}: {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.profile {
        tracy_client::Client::start();
    }

    let layers = if cli.layers.is_empty() {
        LineLayer::road(6.0, 1.5)
    } else {
        cli.layers.clone()
    };

    let request = RenderRequest {
        scale: cli.scale,
        join_options: JoinOptions {
            miter_limit: cli.miter_limit,
        },
        ..RenderRequest::new(Size::new(cli.width, cli.height), cli.format)
    };

    let pool = CoordBufferPool::default();

    let tasks = Mutex::new(cli.inputs.iter().cloned().collect::<VecDeque<_>>());

    let failures = AtomicUsize::new(0);

    let worker_count = cli.worker_count.clamp(1, cli.inputs.len().max(1));

    std::thread::scope(|scope| {
        for worker_id in 0..worker_count {
            let (tasks, failures, pool, request, layers) = (&tasks, &failures, &pool, &request, &layers);

            let output_dir = cli.output_dir.as_path();

            std::thread::Builder::new()
                .name(format!("render-worker-{worker_id}"))
                .spawn_scoped(scope, move || loop {
                    let task = tasks.lock().unwrap_or_else(PoisonError::into_inner).pop_front();

                    let Some(input) = task else {
                        break;
                    };

                    match render_file(&input, output_dir, request, layers, pool) {
                        Ok(output) => {
                            log::info!("{} -> {}", input.display(), output.display());
                        }
                        Err(err) => {
                            log::error!("{} failed: {err}", input.display());

                            failures.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
                .expect("render worker spawn");
        }
    });

    if failures.load(Ordering::Relaxed) == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn render_file(
    input: &Path,
    output_dir: &Path,
    request: &RenderRequest,
    layers: &[LineLayer],
    pool: &CoordBufferPool,
) -> Result<PathBuf, ReError> {
    let drawables = load_drawables_from_geojson(input)?;

    let map = render(request, &drawables, layers, pool)?;

    let stem = input.file_stem().unwrap_or(input.as_os_str());

    let output = output_dir
        .join(stem)
        .with_extension(request.format.extension());

    std::fs::write(&output, &map.image).map_err(|source| ReError::WriteError {
        path: output.display().to_string(),
        source,
    })?;

    Ok(output)
}
