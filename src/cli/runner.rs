use tracing::info;
use tracing_subscriber::EnvFilter;

use bandscale::io::{load_products, load_request};
use bandscale::{MaskAlpha, RasterPlan, Scaling, ScalingRequest, resolve_request};

use super::args::CliArgs;
use super::errors::AppError;

/// Interpret `--scaling`: a JSON list or object, otherwise a mode name.
/// Unknown mode names are reported by the resolver with the offending band.
fn parse_scaling_arg(value: &str) -> Result<Scaling, AppError> {
    if value.trim_start().starts_with(['[', '{']) {
        serde_json::from_str(value).map_err(AppError::InvalidScaling)
    } else {
        Ok(Scaling::mode(value))
    }
}

/// Log filter from `RUST_LOG` directives, DEBUG for everything otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("debug"))
}

fn parse_mask_alpha_arg(value: &str) -> MaskAlpha {
    match value {
        "true" => MaskAlpha::Enabled(true),
        "false" => MaskAlpha::Enabled(false),
        name => MaskAlpha::Band(name.to_string()),
    }
}

/// Merge the request file (if any) with command line overrides.
fn build_request(args: &CliArgs) -> Result<ScalingRequest, AppError> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => ScalingRequest::default(),
    };

    if !args.bands.is_empty() {
        request.bands = args.bands.clone();
    }
    if let Some(level) = &args.processing_level {
        request.processing_level = Some(level.clone());
    }
    if let Some(scaling) = &args.scaling {
        request.scaling = Some(parse_scaling_arg(scaling)?);
    }
    if let Some(data_type) = args.data_type {
        request.data_type = Some(data_type.to_string());
    }
    if let Some(mask_alpha) = &args.mask_alpha {
        request.mask_alpha = Some(parse_mask_alpha_arg(mask_alpha));
    }

    if request.bands.is_empty() {
        return Err(AppError::MissingArgument {
            arg: "--bands".to_string(),
        });
    }
    Ok(request)
}

fn render(plan: &RasterPlan, pretty: bool) -> Result<String, AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(plan)?
    } else {
        serde_json::to_string(plan)?
    };
    Ok(rendered)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        tracing_subscriber::fmt()
            .with_env_filter(log_filter(directives.as_deref()))
            .init();
    }

    let products = load_products(&args.products).map_err(AppError::from)?;
    if products.is_empty() {
        return Err(AppError::NoProducts {
            path: args.products.display().to_string(),
        }
        .into());
    }

    let request = build_request(&args)?;
    info!(
        "Resolving bands {:?} over {} product(s)",
        request.bands,
        products.len()
    );

    let plan = resolve_request(&products, &request).map_err(AppError::from)?;
    println!("{}", render(&plan, args.pretty)?);
    Ok(())
}
