//! Pipeline driver
//!
//! [`Generator::generate`] runs scan → validate → emit on text already in
//! memory. [`Generator::run`] adds the file handling around it: read the
//! input, generate, and write the artifact pair only if every struct passed
//! validation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::info;

use crate::config::GeneratorConfig;
use crate::emit::{emit, Artifacts};
use crate::scanner::scan_with;
use crate::validate::{validate, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "{} is a .c file: its definitions would be compiled again inside the serializers; move the annotated structs into a header",
        .path.display()
    )]
    SourceInput { path: PathBuf },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Paths of the artifacts a successful run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub header: PathBuf,
    pub source: PathBuf,
    pub struct_count: usize,
}

/// Input file name without directory, cut at the first `.`
/// (`dir/net.msg.h` gives `net`)
pub fn artifact_basename(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Generator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce the artifact pair for `source`, read from `input_path`
    pub fn generate(&self, source: &str, input_path: &Path) -> Result<Artifacts, GenerateError> {
        let descriptors = scan_with(source, self.config.match_policy);
        info!(
            "found {} annotated struct(s) in {}",
            descriptors.len(),
            input_path.display()
        );

        let structs = validate(descriptors).into_result()?;

        // The generated .c includes the input, which must not bring
        // function definitions along
        if input_path.extension().is_some_and(|ext| ext == "c") {
            return Err(GenerateError::SourceInput {
                path: input_path.to_path_buf(),
            });
        }

        let basename = artifact_basename(input_path);
        let input_include = include_path(input_path, &self.config.output_dir)
            .to_string_lossy()
            .replace('\\', "/");
        Ok(emit(
            &basename,
            &input_include,
            &self.config.buffer_include,
            &structs,
        ))
    }

    /// Read `input_path`, generate, and write both artifacts into the
    /// configured output directory
    pub fn run(&self, input_path: &Path) -> Result<Written, GenerateError> {
        let source = fs::read_to_string(input_path).map_err(|source| GenerateError::Read {
            path: input_path.to_path_buf(),
            source,
        })?;

        let artifacts = self.generate(&source, input_path)?;

        let header = self.config.output_dir.join(&artifacts.header_file);
        let source_file = self.config.output_dir.join(&artifacts.source_file);
        write_file(&header, &artifacts.header)?;
        write_file(&source_file, &artifacts.source)?;

        info!("wrote {} and {}", header.display(), source_file.display());
        Ok(Written {
            header,
            source: source_file,
            struct_count: artifacts.struct_names.len(),
        })
    }
}

/// How a file in `output_dir` refers to `input` in an `#include "..."`.
///
/// C resolves a quoted include against the including file's directory, so
/// the path is made relative to `output_dir`. Relative paths on both sides
/// are compared as given; anything else goes through the working directory.
pub fn include_path(input: &Path, output_dir: &Path) -> PathBuf {
    let (target, base) = (normalize(input), normalize(output_dir));
    if target.is_relative() && base.is_relative() {
        if let Some(rel) = relative_to(&target, &base) {
            return rel;
        }
    }

    let Ok(cwd) = std::env::current_dir() else {
        return input.to_path_buf();
    };
    let (target, base) = (normalize(&cwd.join(input)), normalize(&cwd.join(output_dir)));
    relative_to(&target, &base).unwrap_or(target)
}

/// Lexically drop `.` and fold `dir/..`
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// `target` as seen from `base`, or `None` when `base` climbs above what the
/// two paths share (a leading `..`, another drive)
fn relative_to(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();
    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    if !base[common..]
        .iter()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    if target[common..]
        .iter()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
    {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for c in &target[common..] {
        rel.push(c);
    }
    Some(rel)
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
