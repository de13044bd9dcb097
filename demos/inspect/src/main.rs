//! Inspect Example
//!
//! Loads a dataset into a fresh codex engine and prints one rendered response
//! as JSON.
//!
//! ```text
//! inspect <dataset.ron|dataset.json> <locale> <kind> [id] [--page N] [--size S]
//! inspect <dataset.ron|dataset.json> <locale> elements
//! ```
//!
//! Configuration is read from the RON file named by `CODEX_CONFIG` when set,
//! otherwise defaults apply; `API_SCHEME`, `API_HOSTNAME`, `API_PORT`,
//! `IMAGE_BASE_URL` and `MAX_PAGE_SIZE` override either. Log output is
//! controlled with `RUST_LOG`.

use codex_core::{parse_ankama_id, CodexConfig, PageRequest};
use codex_db::{DatasetSource, JsonFile, RonFile};
use codex_render::{parse_target, Codex};
use std::path::PathBuf;
use tracing::info;

const USAGE: &str =
    "usage: inspect <dataset.ron|dataset.json> <locale> <kind> [id] [--page N] [--size S]";

/// Parsed command line
struct Args {
    dataset: PathBuf,
    locale: String,
    kind: String,
    id: Option<String>,
    page: PageRequest,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut positional = Vec::new();
        let mut page = PageRequest::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--page" => page.number = Some(flag_value(&arg, args.next())?),
                "--size" => page.size = Some(flag_value(&arg, args.next())?),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let (Some(dataset), Some(locale), Some(kind)) =
            (positional.next(), positional.next(), positional.next())
        else {
            return Err(USAGE.into());
        };
        let id = positional.next();
        if positional.next().is_some() {
            return Err(USAGE.into());
        }

        Ok(Self {
            dataset: PathBuf::from(dataset),
            locale,
            kind,
            id,
            page,
        })
    }

    fn source(&self) -> Box<dyn DatasetSource> {
        match self.dataset.extension().and_then(|e| e.to_str()) {
            Some("json") => Box::new(JsonFile(self.dataset.clone())),
            _ => Box::new(RonFile(self.dataset.clone())),
        }
    }
}

fn flag_value(flag: &str, value: Option<String>) -> Result<i64, Box<dyn std::error::Error>> {
    let value = value.ok_or_else(|| format!("{} needs a value\n{}", flag, USAGE))?;
    Ok(value
        .parse::<i64>()
        .map_err(|e| format!("{} {}: {}", flag, value, e))?)
}

fn load_config() -> Result<CodexConfig, Box<dyn std::error::Error>> {
    match std::env::var("CODEX_CONFIG") {
        Ok(path) => {
            info!(%path, "loading configuration");
            Ok(CodexConfig::load(&path)?)
        }
        Err(_) => {
            let mut config = CodexConfig::default();
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let codex = Codex::new(load_config()?)?;

    let generation = codex.reload(args.source().as_ref())?;
    for (kind, count) in &generation.counts {
        info!(%kind, count, "loaded");
    }

    if args.kind == "elements" {
        println!("{}", serde_json::to_string_pretty(&codex.list_elements()?)?);
        return Ok(());
    }

    let (kind, locale) = parse_target(&args.kind, &args.locale)?;
    let rendered = match &args.id {
        Some(id) => {
            let id = parse_ankama_id(id)?;
            serde_json::to_string_pretty(&codex.render_detail(kind, locale, id)?)?
        }
        None => serde_json::to_string_pretty(&codex.render_list(kind, locale, args.page)?)?,
    };
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codex_core::{EntityKind, Locale};
    use codex_db::Dataset;

    fn args(line: &str) -> Result<Args, Box<dyn std::error::Error>> {
        Args::parse(line.split_whitespace().map(str::to_string))
    }

    #[test]
    fn test_parse_args() {
        let list = args("data.json fr equipment --page 2 --size 10").unwrap();
        assert_eq!(list.page, PageRequest::new(2, 10));
        assert!(list.id.is_none());

        let detail = args("data.ron en items 289").unwrap();
        assert_eq!(detail.id.as_deref(), Some("289"));
        assert_eq!(detail.page, PageRequest::default());

        assert!(args("data.ron en").is_err());
        assert!(args("data.ron en items 1 2").is_err());
        assert!(args("data.ron en items --page").is_err());
        assert!(args("data.ron en items --size x").is_err());
    }

    #[test]
    fn test_sample_files_render() {
        let config = CodexConfig::from_ron(include_str!("../data/codex.ron")).unwrap();
        let dataset = Dataset::from_json(include_str!("../data/sample.json")).unwrap();
        let codex = Codex::new(config).unwrap();
        codex.reload(&dataset).unwrap();

        let detail = codex.render_detail(EntityKind::Item, Locale::Fr, 468).unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Pain d'Amakna");
        assert_eq!(json["recipe"][0]["item_subtype"], "resources");

        let sets = codex
            .render_list(EntityKind::Set, Locale::En, PageRequest::default())
            .unwrap();
        assert_eq!(sets.items.len(), 1);
        assert_eq!(codex.list_elements().unwrap().len(), 5);
    }
}
