//! Rack compiler CLI
//!
//! Usage: `rack-compile <request.json> [output.json]`
//!
//! The request holds a `model`, optional `options` and an optional
//! `orientation` table of member local z-axes. Without a table the axes are
//! derived from member geometry. The document goes to the output path, or to
//! stdout when none is given.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use serde::Deserialize;

use rack_analysis::prelude::*;

#[derive(Debug, Deserialize)]
struct CompileRequest {
    model: StructureModel,
    #[serde(default)]
    options: Option<CompileOptions>,
    #[serde(default)]
    orientation: HashMap<String, Vec3>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: rack-compile <request.json> [output.json]");
    };
    let output = args.next().map(PathBuf::from);

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let request: CompileRequest = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", input.display()))?;

    let compiler = Compiler::new(request.options.unwrap_or_default());
    let document = if request.orientation.is_empty() {
        let geometric = GeometricOrientation::from_model(&request.model);
        compiler.compile(&request.model, &geometric)
    } else {
        compiler.compile(&request.model, &request.orientation)
    }
    .with_context(|| format!("compiling model '{}'", request.model.name))?;

    match output {
        Some(path) => {
            document
                .write_to(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} to {}", document.summary(), path.display());
        }
        None => println!("{}", document.to_json()?),
    }
    Ok(())
}
