use std::borrow::Cow;
use std::io::{self, Write};

use crate::mapping::InstructionMapping;
use crate::tracker::LoopTracker;

/// Token in map values replaced by the generated open label (`--label` mode).
const OPEN_TOKEN: &str = "openlabel";
/// Token in map values replaced by the generated close label (`--label` mode).
const CLOSE_TOKEN: &str = "closelabel";

/// One emitter consumes the instruction stream character-by-character and
/// streams replacement text to `out`.
///
/// Every emitter skips characters without a mapping entry: they produce no
/// output and leave all emitter state untouched.
pub trait Emit {
    fn emit(&mut self, ch: char, out: &mut dyn Write) -> io::Result<()>;
}

/// Generic-mode emitter: streams mapped text with loop-structure indentation.
///
/// `]` lowers the indentation level (clamped at zero) before its text is
/// emitted; `[` raises it after. Indentation is written at most once per
/// output line, just before the first character that is not a newline, so a
/// line consisting only of a newline stays empty. An empty indent unit
/// disables indentation management entirely and text streams verbatim.
pub struct IndentedEmitter<'a> {
    mapping: &'a InstructionMapping,
    indent_unit: String,
    indent_level: usize,
    at_line_start: bool,
}

impl<'a> IndentedEmitter<'a> {
    /// Four-space indentation.
    pub fn new(mapping: &'a InstructionMapping) -> Self {
        Self::with_unit(mapping, "    ")
    }

    pub fn with_unit(mapping: &'a InstructionMapping, indent_unit: impl Into<String>) -> Self {
        Self {
            mapping,
            indent_unit: indent_unit.into(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    fn write_indented(&mut self, text: &str, out: &mut dyn Write) -> io::Result<()> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            if self.at_line_start && ch != '\n' && ch != '\r' {
                for _ in 0..self.indent_level {
                    out.write_all(self.indent_unit.as_bytes())?;
                }
                self.at_line_start = false;
            }
            out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            if ch == '\n' {
                self.at_line_start = true;
            }
        }
        Ok(())
    }
}

impl Emit for IndentedEmitter<'_> {
    fn emit(&mut self, ch: char, out: &mut dyn Write) -> io::Result<()> {
        let Some(text) = self.mapping.get(ch) else {
            return Ok(());
        };

        if self.indent_unit.is_empty() {
            return out.write_all(text.as_bytes());
        }

        // Dedent before the close-bracket text, indent after the open-bracket
        // text, so both render at the enclosing level.
        if ch == ']' {
            self.indent_level = self.indent_level.saturating_sub(1);
        }
        self.write_indented(text, out)?;
        if ch == '[' {
            self.indent_level += 1;
        }
        Ok(())
    }
}

/// Assembly-mode emitter: brackets the mapped loop text with generated
/// `LB<label>:` / `LE<label>:` definition lines.
///
/// Inside the mapped text, the last `]` of the `[` replacement becomes the
/// close-label name (the "jump past the loop" target) and the last `[` of the
/// `]` replacement becomes the open-label name (the "jump back" target).
/// Earlier occurrences are left alone so the placeholder characters can still
/// appear as ordinary content.
pub struct AsmLabelEmitter<'a> {
    mapping: &'a InstructionMapping,
    tracker: LoopTracker,
}

impl<'a> AsmLabelEmitter<'a> {
    pub fn new(mapping: &'a InstructionMapping) -> Self {
        Self {
            mapping,
            tracker: LoopTracker::new(),
        }
    }
}

impl Emit for AsmLabelEmitter<'_> {
    fn emit(&mut self, ch: char, out: &mut dyn Write) -> io::Result<()> {
        let Some(text) = self.mapping.get(ch) else {
            return Ok(());
        };

        match ch {
            '[' => {
                let label = self.tracker.open();
                writeln!(out, "LB{label}:")?;
                let text = replace_last(text, ']', &format!("LE{label}"));
                out.write_all(text.as_bytes())
            }
            ']' => {
                let label = self.tracker.close();
                let text = replace_last(text, '[', &format!("LB{label}"));
                out.write_all(text.as_bytes())?;
                writeln!(out, "LE{label}:")
            }
            _ => out.write_all(text.as_bytes()),
        }
    }
}

/// Template-mode emitter: rewrites every `openlabel` / `closelabel` token in
/// the mapped bracket text to the generated label names.
///
/// Unlike assembly mode, no stand-alone label-definition lines are emitted;
/// the map values are expected to embed the definitions themselves.
pub struct TemplateLabelEmitter<'a> {
    mapping: &'a InstructionMapping,
    tracker: LoopTracker,
}

impl<'a> TemplateLabelEmitter<'a> {
    pub fn new(mapping: &'a InstructionMapping) -> Self {
        Self {
            mapping,
            tracker: LoopTracker::new(),
        }
    }
}

impl Emit for TemplateLabelEmitter<'_> {
    fn emit(&mut self, ch: char, out: &mut dyn Write) -> io::Result<()> {
        let Some(text) = self.mapping.get(ch) else {
            return Ok(());
        };

        match ch {
            '[' | ']' => {
                let label = if ch == '[' {
                    self.tracker.open()
                } else {
                    self.tracker.close()
                };
                let text = text
                    .replace(OPEN_TOKEN, &format!("LB{label}"))
                    .replace(CLOSE_TOKEN, &format!("LE{label}"));
                out.write_all(text.as_bytes())
            }
            _ => out.write_all(text.as_bytes()),
        }
    }
}

/// Replace the last occurrence of `target` in `text` with `replacement`.
///
/// A reverse search plus splice, so earlier occurrences of `target` survive
/// as ordinary content. Returns the text unchanged when `target` is absent.
fn replace_last<'t>(text: &'t str, target: char, replacement: &str) -> Cow<'t, str> {
    match text.rfind(target) {
        Some(at) => {
            let mut spliced = String::with_capacity(text.len() + replacement.len());
            spliced.push_str(&text[..at]);
            spliced.push_str(replacement);
            spliced.push_str(&text[at + target.len_utf8()..]);
            Cow::Owned(spliced)
        }
        None => Cow::Borrowed(text),
    }
}
