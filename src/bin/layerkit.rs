use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use layerkit::{
    Background, BindingKey, ContentProvider, DirAssetStore, ImageCache, ImageSource, NoImages,
    PixelSize, PreviewContentProvider, Project, RenderSettings, StaticContentProvider,
    TemplateCategory, TemplateLibrary, WidgetSize, WidgetType,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layerkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a project JSON file to a PNG.
    Render {
        #[arg(long)]
        project: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, requires = "height", conflicts_with = "scale")]
        width: Option<u32>,
        #[arg(long, requires = "width", conflicts_with = "scale")]
        height: Option<u32>,
        /// Display scale applied to the widget's canonical canvas size.
        #[arg(long, default_value_t = 2.0)]
        scale: f64,
        /// Binding value as `key=value`; may be repeated.
        #[arg(long = "bind", value_parser = parse_binding)]
        bindings: Vec<(String, String)>,
        /// Fill unbound keys with sample values.
        #[arg(long)]
        preview: bool,
        /// Root directory for image references.
        #[arg(long)]
        assets: Option<PathBuf>,
    },
    /// List catalog templates.
    Templates {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Also render a preview PNG per listed template into this directory.
        #[arg(long)]
        thumbnails: Option<PathBuf>,
    },
    /// Create a project JSON from a catalog template.
    Instantiate {
        #[arg(long)]
        template: String,
        #[arg(long, value_parser = parse_widget_type)]
        widget_type: WidgetType,
        #[arg(long, value_parser = parse_widget_size)]
        size: WidgetSize,
        #[arg(long)]
        out: PathBuf,
    },
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("binding key must not be empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_widget_type(raw: &str) -> Result<WidgetType, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown widget type '{raw}'"))
}

fn parse_widget_size(raw: &str) -> Result<WidgetSize, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown widget size '{raw}'"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LAYERKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render {
            project,
            out,
            width,
            height,
            scale,
            bindings,
            preview,
            assets,
        } => {
            let json = std::fs::read_to_string(&project)
                .with_context(|| format!("read project '{}'", project.display()))?;
            let project = Project::from_json_str(&json).context("parse project json")?;
            let size = match (width, height) {
                (Some(w), Some(h)) => PixelSize::new(w, h),
                _ => project.widget_size.pixel_size(scale),
            };

            let overrides = bindings
                .into_iter()
                .fold(StaticContentProvider::new(), |p, (k, v)| p.with(k.as_str(), v));
            let content = move |key: &BindingKey| {
                overrides
                    .value(key)
                    .or_else(|| preview.then(|| PreviewContentProvider.value(key)).flatten())
            };

            let settings = RenderSettings::from_env();
            let cache = assets.map(|root| ImageCache::new(Arc::new(DirAssetStore::new(root))));
            if let (Some(cache), Background::Image(bg)) = (&cache, &project.background)
                && let Err(err) = cache.load_now(&bg.reference)
            {
                tracing::warn!(reference = %bg.reference, %err, "background image unavailable");
            }
            let images: &dyn ImageSource = match &cache {
                Some(cache) => cache,
                None => &NoImages,
            };

            let frame = layerkit::render_project(&project, size, &content, images, &settings)
                .context("render project")?;
            write_png(&out, frame.width, frame.height, &frame.to_straight_rgba8())?;
            eprintln!("wrote {}", out.display());
        }
        Command::Templates {
            category,
            search,
            thumbnails,
        } => {
            let library = TemplateLibrary::builtin();
            let mut listed = library.search(search.as_deref().unwrap_or(""));
            if let Some(name) = &category {
                let category = TemplateCategory::parse(name)
                    .with_context(|| format!("unknown category '{name}'"))?;
                listed.retain(|t| t.category == category);
            }

            for t in &listed {
                println!(
                    "{:<22} {:<10} {}{}",
                    t.id,
                    t.category.display_name(),
                    t.name,
                    if t.is_seasonal() { " (seasonal)" } else { "" }
                );
            }

            if let Some(dir) = thumbnails {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("create dir '{}'", dir.display()))?;
                let jobs: Vec<(&Project, PixelSize)> = listed
                    .iter()
                    .map(|t| (&t.project, t.project.widget_size.pixel_size(1.0)))
                    .collect();
                let frames = layerkit::render_batch(
                    &jobs,
                    &PreviewContentProvider,
                    &NoImages,
                    &RenderSettings::from_env(),
                );
                for (t, frame) in listed.iter().zip(frames) {
                    let frame = frame.with_context(|| format!("render template '{}'", t.id))?;
                    let path = dir.join(format!("{}.png", t.id));
                    write_png(&path, frame.width, frame.height, &frame.to_straight_rgba8())?;
                    eprintln!("wrote {}", path.display());
                }
            }
        }
        Command::Instantiate {
            template,
            widget_type,
            size,
            out,
        } => {
            let mut library = TemplateLibrary::builtin();
            let project = library.instantiate(&template, widget_type, size)?;
            let json = project.to_json_string_pretty()?;
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
    }

    Ok(())
}

fn write_png(out: &std::path::Path, width: u32, height: u32, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        data,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}
