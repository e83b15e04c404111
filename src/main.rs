use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use cdmodel::datatype;
use cdmodel::measure::TextMetrics;
use cdmodel::{Document, EngineError, Model, read_model};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use log::info;

/// cdmodel - inspect conceptual and physical model documents
#[derive(Parser)]
#[command(name = "cdmodel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the typed model as JSON.
    Read {
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a table of entities with their attribute and relation counts.
    Summary { file: PathBuf },

    /// Check that the document survives a load/serialize/load round trip.
    Check { file: PathBuf },
}

fn main() {
    let _logger = match Logger::try_with_env_or_str("warn").and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {}", e);
            None
        }
    };

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Read { file, output, compact } => read(&file, output.as_deref(), compact),
        Command::Summary { file } => summary(&file),
        Command::Check { file } => check(&file),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn load(path: &Path) -> Result<Document, EngineError> {
    let text = fs::read_to_string(path)?;
    let doc = Document::load(&text)?;
    info!("loaded {}", path.display());
    Ok(doc)
}

fn read(path: &Path, output: Option<&Path>, compact: bool) -> Result<(), EngineError> {
    let model = read_model(&load(path)?)?;
    let json = if compact {
        serde_json::to_string(&model)?
    } else {
        serde_json::to_string_pretty(&model)?
    };

    match output {
        Some(out) => fs::write(out, json + "\n")?,
        None => println!("{}", json),
    }
    Ok(())
}

fn summary(path: &Path) -> Result<(), EngineError> {
    let model = read_model(&load(path)?)?;
    print!("{}", render_summary(&model));
    Ok(())
}

fn render_summary(model: &Model) -> String {
    let rows: Vec<Vec<String>> = model
        .entities
        .iter()
        .map(|entity| {
            let primary = entity
                .primary_identifier()
                .and_then(|identifier| identifier.attribute_id.as_deref())
                .and_then(|id| entity.attribute(id))
                .map(|attribute| {
                    let label = datatype::label(&attribute.data_type).unwrap_or(attribute.data_type.as_str());
                    format!("{} ({})", attribute.name, label)
                })
                .unwrap_or_default();

            vec![
                entity.id.clone(),
                entity.name.clone(),
                entity.attributes.len().to_string(),
                model.relations_of(&entity.id).count().to_string(),
                primary,
            ]
        })
        .collect();

    let mut output = format!(
        "{} model: {} entities, {} relations, {} domains\n\n",
        model.dialect,
        model.entities.len(),
        model.relations.len(),
        model.domains.len()
    );
    output.push_str(&TextMetrics::default().render_table(
        &["Id", "Entity", "Attributes", "Relations", "Primary key"],
        &rows,
    ));
    output
}

fn check(path: &Path) -> Result<(), EngineError> {
    let first = load(path)?.to_xml();
    let second = Document::load(&first)?.to_xml();
    let model = Model::from_xml(&second)?;

    if first != second {
        eprintln!("{}: serialization is not stable", path.display());
        process::exit(1);
    }
    println!(
        "{}: ok ({} entities, {} relations)",
        path.display(),
        model.entities.len(),
        model.relations.len()
    );
    Ok(())
}
