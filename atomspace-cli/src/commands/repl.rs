//! Interactive shell over the command interpreter

use crate::commands::load_files;
use crate::config::CliConfig;
use crate::utils::{print_error, print_info};
use anyhow::Result;
use atomspace::{AtomPrinter, AtomSpace};
use atomspace_sexpr::{CommandError, Commands};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// What the shell should do after a line
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Continue,
    Exit,
}

pub async fn repl_command(config: &CliConfig, space: &AtomSpace, preload: &[PathBuf]) -> Result<()> {
    load_files(config, space, preload)?;

    let shell = Shell::new(config, space);
    let mut editor = DefaultEditor::new()?;

    println!("{}", "AtomSpace shell".bold());
    println!("Type '.help' for available commands\n");

    loop {
        match editor.readline(&config.repl.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                match shell.execute(&line) {
                    Ok((Action::Exit, _)) => break,
                    Ok((Action::Continue, output)) => {
                        if !output.is_empty() {
                            println!("{}", output);
                        }
                    }
                    Err(message) => print_error(&message),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                print_error(&format!("{:?}", err));
                break;
            }
        }
    }

    print_info(&format!("{} atoms in store", space.count()));
    Ok(())
}

struct Shell<'a> {
    config: &'a CliConfig,
    space: &'a AtomSpace,
    commands: Commands,
}

impl<'a> Shell<'a> {
    fn new(config: &'a CliConfig, space: &'a AtomSpace) -> Self {
        Shell {
            config,
            space,
            commands: Commands::with_config(config.loader),
        }
    }

    fn execute(&self, line: &str) -> std::result::Result<(Action, String), String> {
        let trimmed = line.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(word, rest)| (word, rest.trim()));

        let output = match word {
            ".help" | "help" => HELP.trim_end().to_string(),
            ".exit" | ".quit" | "exit" | "quit" => return Ok((Action::Exit, String::new())),
            ".count" => self.space.count().to_string(),
            ".load" => {
                if rest.is_empty() {
                    return Err("Usage: .load <file>".to_string());
                }
                let reports = load_files(self.config, self.space, &[PathBuf::from(rest)])
                    .map_err(|error| format!("{:#}", error))?;
                let expressions: usize = reports.iter().map(|report| report.expressions).sum();
                format!("{} expressions, {} atoms", expressions, self.space.count())
            }
            ".dump" => {
                let printer = AtomPrinter::new(self.config.printer.clone());
                self.space
                    .sorted_atoms()
                    .iter()
                    .map(|atom| printer.print(atom))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            _ => self
                .commands
                .interpret(self.space, trimmed)
                .map_err(|error| describe(&error, trimmed))?,
        };
        Ok((Action::Continue, output))
    }
}

fn describe(error: &CommandError, line: &str) -> String {
    match error {
        CommandError::Parse(parse) => parse.render(line).trim_end().to_string(),
        other => other.to_string(),
    }
}

const HELP: &str = r#"
Commands:
  (cog-node 'Type "name")            look up a node
  (cog-link 'Type <atom>...)         look up a link
  (cog-get-atoms 'Type [#t])         atoms of a type (#t adds subtypes)
  (cog-incoming-set <atom>)          links containing an atom
  (cog-incoming-by-type <atom> 'T)   same, restricted to one link type
  (cog-extract! <atom>)              remove an atom with no incoming links
  (cog-extract-recursive! <atom>)    remove an atom and everything above it
  (cog-atomspace-clear)              remove every atom
  .load <file>                       load an Atomese file
  .dump                              print the store in canonical order
  .count                             number of atoms
  .exit                              leave the shell
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_lines() {
        let config = CliConfig::default();
        let space = AtomSpace::new();
        let shell = Shell::new(&config, &space);

        space.add_node("ConceptNode", "a").unwrap();
        assert_eq!(
            shell.execute("(cog-node 'ConceptNode \"a\")").unwrap(),
            (Action::Continue, "(ConceptNode \"a\")".to_string())
        );
        assert_eq!(
            shell.execute(".count").unwrap(),
            (Action::Continue, "1".to_string())
        );
        assert_eq!(
            shell.execute(".dump").unwrap(),
            (Action::Continue, "(ConceptNode \"a\")".to_string())
        );
        assert_eq!(shell.execute(".exit").unwrap().0, Action::Exit);
        assert!(shell.execute(".load").is_err());
        assert!(shell
            .execute("(cog-node 'ConceptNode \"a)")
            .unwrap_err()
            .contains("Unterminated string"));
    }
}
