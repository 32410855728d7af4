//! A Brainfuck substitution transpiler library.
//!
//! This crate turns a Brainfuck instruction stream into text in an arbitrary
//! target notation by replacing each instruction character with caller-supplied
//! replacement text.
//!
//! Features and behaviors:
//! - An immutable instruction mapping, built in or loaded from a JSON map file.
//! - Three emission modes sharing one loop-nesting discipline: generic output
//!   with structural indentation, assembly-style output with generated
//!   `LB<label>:`/`LE<label>:` loop lines, and template output where
//!   `openlabel`/`closelabel` tokens are rewritten in place.
//! - Characters without a mapping entry are silently skipped.
//! - Unbalanced brackets are not rejected; labels and indentation degrade
//!   leniently instead of failing.
//! - Streaming: input is scanned linearly and output is written as it is
//!   produced, so neither side is materialized in memory.
//!
//! Quick start:
//!
//! ```
//! use bft::{Emit, IndentedEmitter, InstructionMapping};
//!
//! let mapping = InstructionMapping::default();
//! let mut emitter = IndentedEmitter::new(&mapping);
//! let mut out = Vec::new();
//! for ch in "++[-]".chars() {
//!     emitter.emit(ch, &mut out).expect("writing to a Vec cannot fail");
//! }
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text, "inc *p\ninc *p\nwhile *p\n    dec *p\nwend\n");
//! ```

pub mod convert;
pub mod emitter;
pub mod mapping;
pub mod tracker;

pub use convert::{ConvertError, convert};
pub use emitter::{AsmLabelEmitter, Emit, IndentedEmitter, TemplateLabelEmitter};
pub use mapping::{INSTRUCTIONS, InstructionMapping, MappingError};
pub use tracker::{Bracket, LoopTracker};
