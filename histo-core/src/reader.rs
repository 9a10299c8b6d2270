use histo_common::{HistoError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".into(),
            Self::File(p) => p.display().to_string(),
        }
    }
}

/// Resolve CLI arguments: none or "-" is stdin, an existing file is taken
/// as-is, anything else is expanded as a glob pattern.
pub fn resolve_inputs(args: &[String]) -> Result<Vec<InputSource>> {
    if args.is_empty() {
        return Ok(vec![InputSource::Stdin]);
    }
    let mut out = Vec::new();
    for arg in args {
        if arg == "-" {
            out.push(InputSource::Stdin);
            continue;
        }
        let path = Path::new(arg);
        if path.is_file() {
            out.push(InputSource::File(path.to_path_buf()));
            continue;
        }
        let entries = glob::glob(arg).map_err(|e| HistoError::BadPattern {
            pattern: arg.clone(),
            reason: e.to_string(),
        })?;
        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(p) if p.is_file() => matched.push(p),
                Ok(_) => {}
                Err(e) => warn!(pattern = %arg, error = %e, "skipping unreadable glob entry"),
            }
        }
        if matched.is_empty() {
            return Err(HistoError::NoInput(arg.clone()));
        }
        matched.sort();
        out.extend(matched.into_iter().map(InputSource::File));
    }
    debug!(sources = ?out, "resolved inputs");
    Ok(out)
}

/// Parse whitespace-separated numbers. The first token that is not a finite
/// float aborts with its 1-based line number.
pub fn read_values<R: BufRead>(reader: R, input: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => values.push(v),
                _ => {
                    return Err(HistoError::InvalidValue {
                        input: input.to_string(),
                        line: idx + 1,
                        token: token.to_string(),
                    })
                }
            }
        }
    }
    Ok(values)
}

pub fn read_sources(sources: &[InputSource]) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for src in sources {
        let name = src.name();
        let mut chunk = match src {
            InputSource::Stdin => read_values(std::io::stdin().lock(), &name)?,
            InputSource::File(p) => read_values(BufReader::new(File::open(p)?), &name)?,
        };
        debug!(input = %name, count = chunk.len(), "read values");
        values.append(&mut chunk);
    }
    Ok(values)
}
