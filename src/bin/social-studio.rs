use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use social_studio::{
    ContentFields, DownloadDir, EditorSession, FilePicker, StudioConfig, ThemeRegistry,
};

#[derive(Parser, Debug)]
#[command(name = "social-studio", version)]
struct Cli {
    /// Configuration file (JSON). Missing file means defaults.
    #[arg(long, global = true, default_value = "social-studio.json")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available themes.
    Themes,
    /// List the layout archetypes.
    Layouts,
    /// Print the caption for some content.
    Caption {
        /// Content fields (JSON). Defaults to the example content.
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Print the resolved scene as JSON.
    Scene(ComposeArgs),
    /// Export the post as `facebook-post.png` and print its caption.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ComposeArgs {
    #[arg(long)]
    theme: Option<String>,

    #[arg(long)]
    layout: Option<String>,

    /// Content fields (JSON). Defaults to the example content.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Product picture.
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    compose: ComposeArgs,

    /// Output directory. Overrides `export.output_dir` from the config.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write a preview PNG rendered at this edge length.
    #[arg(long)]
    preview: Option<u32>,

    /// Copy the caption to the system clipboard.
    #[arg(long)]
    copy: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = StudioConfig::load(&cli.config)
        .with_context(|| format!("load config '{}'", cli.config.display()))?;
    social_studio::logging::init_logging(&cfg.logging);

    match cli.cmd {
        Command::Themes => cmd_themes(&cfg),
        Command::Layouts => {
            for l in social_studio::list_layouts() {
                println!("{:<8} {:<18} {}", l.id.as_str(), l.name, l.description);
            }
            Ok(())
        }
        Command::Caption { content } => {
            let fields = read_content(content.as_deref())?;
            println!("{}", social_studio::assemble(&fields));
            Ok(())
        }
        Command::Scene(args) => {
            let session = build_session(&cfg, &args)?;
            println!("{}", session.scene().to_json()?);
            eprintln!("fingerprint {:016x}", session.scene().fingerprint());
            Ok(())
        }
        Command::Render(args) => cmd_render(&cfg, args).await,
    }
}

fn cmd_themes(cfg: &StudioConfig) -> anyhow::Result<()> {
    let registry = match &cfg.themes_file {
        Some(path) => ThemeRegistry::with_extra_file(path)?,
        None => ThemeRegistry::builtin(),
    };
    for t in registry.list() {
        println!("{:<12} {:<22} {}", t.id, t.name, t.description);
    }
    Ok(())
}

fn read_content(path: Option<&Path>) -> anyhow::Result<ContentFields> {
    let Some(path) = path else {
        return Ok(ContentFields::example());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read content '{}'", path.display()))?;
    Ok(ContentFields::from_json(&json)?)
}

fn build_session(cfg: &StudioConfig, args: &ComposeArgs) -> anyhow::Result<EditorSession> {
    let mut session = EditorSession::from_config(cfg).context("start editor session")?;
    if let Some(theme) = &args.theme {
        session.select_theme(theme)?;
    }
    if let Some(layout) = &args.layout {
        session.select_layout(layout)?;
    }
    if args.content.is_some() {
        session.set_fields(read_content(args.content.as_deref())?);
    }
    if let Some(image) = &args.image {
        session
            .pick_image(&mut FilePicker::new(image))
            .with_context(|| format!("load image '{}'", image.display()))?;
    }
    Ok(session)
}

async fn cmd_render(cfg: &StudioConfig, args: RenderArgs) -> anyhow::Result<()> {
    let mut session = build_session(cfg, &args.compose)?;
    let out_dir = args.out.unwrap_or_else(|| cfg.export.output_dir.clone());
    let sink = DownloadDir::new(&out_dir);

    if let Some(edge) = args.preview {
        session.set_display_size(edge, edge)?;
        let preview = session.render_preview()?;
        let path = out_dir.join("preview.png");
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
        std::fs::write(&path, preview.encode_png()?)
            .with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    let asset = session.export_to(&sink).await?;
    eprintln!(
        "wrote {} ({}x{})",
        sink.path_for(&asset).display(),
        asset.width,
        asset.height
    );

    println!("{}", session.caption());
    if args.copy {
        copy_caption(&mut session)?;
        eprintln!("caption copied");
    }
    Ok(())
}

#[cfg(feature = "clipboard")]
fn copy_caption(session: &mut EditorSession) -> anyhow::Result<()> {
    let mut clipboard = social_studio::SystemClipboard::new()?;
    session.copy_caption(&mut clipboard)?;
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
fn copy_caption(_session: &mut EditorSession) -> anyhow::Result<()> {
    anyhow::bail!("built without the `clipboard` feature")
}
