//! Subcommand handlers
//!
//! Handlers print their progress to stdout and return the first hard failure, which
//! ends the run without changing the exit status.
//! Mapping warnings are not failures; they are logged as they are raised.

use crate::report::{banner, creation_summary, extraction_report};
use pagemap::mapping::{
    build_anchor_mapping, build_offset_mapping, open_document, save_mapping, DocumentError,
    LinkDump, MappingStore, PersistError,
};
use pagemap_config::PagemapConfig;
use std::fmt;
use std::path::Path;

/// Logical page shown as a sample after building an offset mapping.
const OFFSET_SAMPLE_PAGE: u32 = 219;

#[derive(Debug)]
pub enum CommandError {
    Document {
        path: String,
        source: DocumentError,
    },
    Persist(PersistError),
    Config(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Document { path, source } => {
                write!(f, "Could not read document {}: {}", path, source)
            }
            CommandError::Persist(err) => write!(f, "Could not store mapping: {}", err),
            CommandError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<PersistError> for CommandError {
    fn from(err: PersistError) -> Self {
        CommandError::Persist(err)
    }
}

fn open(path: &Path) -> Result<LinkDump, CommandError> {
    open_document(path).map_err(|source| CommandError::Document {
        path: path.display().to_string(),
        source,
    })
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Handle the extract command
pub fn handle_extract(
    config: &PagemapConfig,
    path: &Path,
    output: Option<&Path>,
) -> Result<(), CommandError> {
    let document = open(path)?;
    log::info!("scanning {} for contents anchors", path.display());

    let result = build_anchor_mapping(&document, &config.extract_options());

    match output {
        Some(output) => {
            save_mapping(output, &result.mapping)?;
            print!("{}", creation_summary(&result.mapping, 1));
        }
        None => print!("{}", extraction_report(&result, &config.report)),
    }
    Ok(())
}

/// Handle the build command
pub fn handle_build(
    config: &PagemapConfig,
    case_dir: &Path,
    offset_path: &Path,
    anchor_path: &Path,
) -> Result<(), CommandError> {
    let store = MappingStore::new(case_dir, &config.cache.dir_name, &config.cache.file_suffix);
    store.ensure_dir()?;

    print!("{}", banner("BUILDING COMPLETE PAGE MAPPINGS"));

    // The offset document's contents change length between revisions; always rebuild it
    println!("Building mapping for offset document ({})...", stem(offset_path));
    let offset_document = open(offset_path)?;
    let offset = build_offset_mapping(&offset_document, &config.offset_options());
    println!("  Detected offset: Physical = Logical + {}", offset.offset);
    print!("{}", creation_summary(&offset.mapping, OFFSET_SAMPLE_PAGE));
    println!();
    let saved = store.save(offset_path, &offset.mapping)?;
    println!("  Saved to: {}", saved.display());
    println!();

    let cached = if config.cache.reuse_existing {
        store.load_cached(anchor_path)?
    } else {
        None
    };
    match cached {
        Some(mapping) => {
            println!(
                "Mapping for anchor document ({}) already exists, skipping...",
                stem(anchor_path)
            );
            println!("  Loaded {} mappings from cache", mapping.len());
        }
        None => {
            println!("Building mapping for anchor document ({})...", stem(anchor_path));
            let anchor_document = open(anchor_path)?;
            let result = build_anchor_mapping(&anchor_document, &config.build_options());
            print!("{}", creation_summary(&result.mapping, 1));
            let saved = store.save(anchor_path, &result.mapping)?;
            println!("  Saved to: {}", saved.display());
        }
    }
    println!();

    print!("{}", banner("DONE!"));
    Ok(())
}
