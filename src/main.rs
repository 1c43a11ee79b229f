use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use famtree::tree::{extract_bounded, extract_descendants};
use famtree::{Config, FamilyDataset, PersonId};
use std::path::{Path, PathBuf};

/// Family relationship engine: paths, kinship terms and tree extraction.
#[derive(Parser, Debug)]
#[command(name = "famtree", version)]
struct Cli {
    /// Dataset file (JSON or YAML). Defaults to famtree.data_path from config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file. Defaults to $FAMTREE_CONFIG, then ./config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest relation path between two people and its kinship term
    Relate {
        #[arg(long)]
        from: u64,
        #[arg(long)]
        to: u64,
    },
    /// Descendants of a person, with spouses, as JSON
    Descendants {
        #[arg(long)]
        root: u64,
        #[arg(long)]
        depth: Option<usize>,
    },
    /// People and links around a person within node/relationship limits, as JSON
    Neighborhood {
        #[arg(long)]
        focus: u64,
        #[arg(long)]
        max_nodes: Option<usize>,
        #[arg(long)]
        max_relationships: Option<usize>,
    },
    /// Descendant diagram in DOT format
    Render {
        #[arg(long)]
        root: u64,
        #[arg(long)]
        depth: Option<usize>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.famtree.log_level.as_str()),
    )
    .init();

    log::debug!("famtree v{}", env!("CARGO_PKG_VERSION"));

    let data_path = cli
        .data
        .as_deref()
        .or_else(|| config.data_path())
        .context("No dataset given (use --data or set famtree.data_path in config)")?;
    let dataset = load_dataset(data_path)?;

    match cli.command {
        Command::Relate { from, to } => relate(&dataset, &config, PersonId(from), PersonId(to)),
        Command::Descendants { root, depth } => {
            let root = PersonId(root);
            dataset.require(root)?;
            let tree = extract_descendants(
                &dataset.people,
                &dataset.links,
                root,
                depth.unwrap_or(config.traversal.max_depth),
            );
            println!("{}", serde_json::to_string_pretty(&tree)?);
            Ok(())
        }
        Command::Neighborhood {
            focus,
            max_nodes,
            max_relationships,
        } => {
            let focus = PersonId(focus);
            dataset.require(focus)?;
            let subgraph = extract_bounded(
                &dataset.people,
                &dataset.links,
                focus,
                max_nodes.unwrap_or(config.traversal.max_nodes),
                max_relationships.unwrap_or(config.traversal.max_relationships),
            );
            println!("{}", serde_json::to_string_pretty(&subgraph)?);
            Ok(())
        }
        Command::Render {
            root,
            depth,
            output,
        } => {
            let root = PersonId(root);
            dataset.require(root)?;
            let tree = extract_descendants(
                &dataset.people,
                &dataset.links,
                root,
                depth.unwrap_or(config.traversal.max_depth),
            );
            let dot = tree.render(&config.render_options()).to_dot();
            match output {
                Some(path) => {
                    std::fs::write(&path, dot)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote diagram to {}", path.display());
                }
                None => print!("{}", dot),
            }
            Ok(())
        }
    }
}

fn load_dataset(path: &Path) -> Result<FamilyDataset> {
    FamilyDataset::load(path).with_context(|| format!("Failed to load dataset {}", path.display()))
}

fn relate(dataset: &FamilyDataset, config: &Config, from: PersonId, to: PersonId) -> Result<()> {
    let start = dataset.require(from)?;
    let end = dataset.require(to)?;

    let graph = dataset.graph();
    let path = graph.shortest_path(from, to);
    if path.is_empty() {
        println!("No relation found between {} and {}", start.name, end.name);
        return Ok(());
    }

    let name = |id: PersonId| {
        graph
            .person(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let mut line = name(from);
    for edge in &path.edges {
        line.push_str(&format!(" -[{}]-> {}", edge.kind, name(edge.to)));
    }
    println!("{}", line);

    let term = config.kinship_engine().infer(&path, graph.people());
    println!("{} is {}'s {}", start.name, end.name, term);
    Ok(())
}
