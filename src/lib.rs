//! # Introduction
//!
//! serialgen reads C source, finds every struct annotated with a
//! `//!serialize` line, and generates a `.h`/`.c` pair with binary
//! serialize/deserialize functions for those structs.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Descriptors → Validator → ValidStructs → Emitter → .h + .c
//! ```
//!
//! 1. [`scanner`]: a character-level automaton that extracts each annotated
//!    struct's name and member declarations. Malformed input is skipped, not
//!    reported.
//! 2. [`validate`]: checks members against the [`validate::ScalarType`]
//!    allow-list and batches every rejection into one error.
//! 3. [`emit`]: renders the header and the definitions. The wire format is
//!    fixed little-endian with no padding.
//! 4. [`codec`]: a Rust implementation of the same wire format.
//! 5. [`generate`]: ties the stages together and does the file I/O.
//!
//! ## Supported member types
//!
//! `char`, `int8_t`, `uint8_t`, `int16_t`, `uint16_t`, `int32_t`,
//! `uint32_t`, `float`, `double`. One `<type> <name>;` per member.

pub mod codec;
pub mod config;
pub mod emit;
pub mod generate;
pub mod scanner;
pub mod validate;

pub use config::GeneratorConfig;
pub use generate::{GenerateError, Generator};
