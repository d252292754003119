//! Canonical s-expression printer
//!
//! Renders atoms in the same grammar the loader reads:
//! `(ConceptNode "name")` for nodes and `(ListLink <child> ...)` for links.
//! Only `"` and `\` are escaped inside names; every other character,
//! including newlines and non-Latin scripts, is written verbatim.

use crate::atom::Atom;
use crate::store::AtomSpace;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::{self, Write};

/// Layout of printed links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintStyle {
    /// Whole atom on one line
    #[default]
    Compact,
    /// Each child of a link on its own indented line
    Pretty,
}

/// Printer configuration (`[printer]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub style: PrintStyle,
    pub indent: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            style: PrintStyle::Compact,
            indent: 2,
        }
    }
}

/// Which atoms a dump contains (`[dump]` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Only write atoms that no link in the store points at
    pub roots_only: bool,
}

/// Escape a node name for use inside a quoted string
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if !name.contains(|c: char| c == '"' || c == '\\') {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

#[derive(Debug, Clone, Default)]
pub struct AtomPrinter {
    config: PrintConfig,
}

impl AtomPrinter {
    pub fn new(config: PrintConfig) -> Self {
        AtomPrinter { config }
    }

    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty(indent: usize) -> Self {
        AtomPrinter {
            config: PrintConfig {
                style: PrintStyle::Pretty,
                indent,
            },
        }
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    pub fn print(&self, atom: &Atom) -> String {
        let mut output = String::new();
        self.write_atom(atom, &mut output, 0);
        output
    }

    fn write_atom(&self, atom: &Atom, output: &mut String, level: usize) {
        output.push('(');
        output.push_str(atom.type_name());

        if let Some(name) = atom.name() {
            output.push_str(" \"");
            output.push_str(&escape_name(name));
            output.push('"');
        } else {
            for child in atom.outgoing() {
                match self.config.style {
                    PrintStyle::Compact => output.push(' '),
                    PrintStyle::Pretty => {
                        output.push('\n');
                        output.push_str(&" ".repeat((level + 1) * self.config.indent));
                    }
                }
                self.write_atom(child, output, level + 1);
            }
        }

        output.push(')');
    }
}

/// Compact rendering of a single atom
pub fn serialize_atom(atom: &Atom) -> String {
    AtomPrinter::compact().print(atom)
}

/// Every atom in the store, in canonical order, one compact atom per line.
pub fn serialize_store(space: &AtomSpace) -> String {
    let mut output = String::new();
    let printer = AtomPrinter::compact();
    for atom in space.sorted_atoms() {
        output.push_str(&printer.print(&atom));
        output.push('\n');
    }
    output
}

/// Stream a canonical dump of `space` into `writer`. Returns the number of
/// atoms written.
pub fn write_store<W: Write>(
    space: &AtomSpace,
    writer: &mut W,
    printer: &AtomPrinter,
    options: &DumpOptions,
) -> io::Result<usize> {
    let atoms = if options.roots_only {
        space.roots()
    } else {
        space.sorted_atoms()
    };
    for atom in &atoms {
        writer.write_all(printer.print(atom).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(atoms.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AtomType;
    use std::sync::Arc;

    fn concept(name: &str) -> Arc<Atom> {
        Arc::new(Atom::node(AtomType::node("ConceptNode"), name).unwrap())
    }

    #[test]
    fn test_escape_name() {
        assert_eq!(escape_name("plain"), "plain");
        assert!(matches!(escape_name("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_name(r#"vfjv"jnvfé"#), r#"vfjv\"jnvfé"#);
        assert_eq!(escape_name(r"back\slash"), r"back\\slash");
        assert_eq!(escape_name("line\nbreak"), "line\nbreak");
    }

    #[test]
    fn test_compact_and_pretty() {
        let list = Atom::link(
            AtomType::link("ListLink"),
            vec![concept("a\"b"), concept("c")],
        )
        .unwrap();

        assert_eq!(
            serialize_atom(&list),
            r#"(ListLink (ConceptNode "a\"b") (ConceptNode "c"))"#
        );
        assert_eq!(
            AtomPrinter::pretty(2).print(&list),
            "(ListLink\n  (ConceptNode \"a\\\"b\")\n  (ConceptNode \"c\"))"
        );
    }

    #[test]
    fn test_empty_link() {
        let empty = Atom::link(AtomType::link("ListLink"), vec![]).unwrap();
        assert_eq!(serialize_atom(&empty), "(ListLink)");
    }

    #[test]
    fn test_unicode_passes_through() {
        let atom = concept("вверху плыли редкие облачка");
        assert_eq!(
            serialize_atom(&atom),
            "(ConceptNode \"вверху плыли редкие облачка\")"
        );
    }

    #[test]
    fn test_write_store_roots_only() {
        let space = AtomSpace::new();
        let a = space.add_node("ConceptNode", "a").unwrap();
        let b = space.add_node("ConceptNode", "b").unwrap();
        space.add_link("ListLink", vec![a, b]).unwrap();

        let mut all = Vec::new();
        let written = write_store(&space, &mut all, &AtomPrinter::compact(), &DumpOptions::default()).unwrap();
        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(all).unwrap(), serialize_store(&space));

        let mut roots = Vec::new();
        let written = write_store(
            &space,
            &mut roots,
            &AtomPrinter::compact(),
            &DumpOptions { roots_only: true },
        )
        .unwrap();
        assert_eq!(written, 1);
        assert_eq!(
            String::from_utf8(roots).unwrap(),
            "(ListLink (ConceptNode \"a\") (ConceptNode \"b\"))\n"
        );
    }
}
