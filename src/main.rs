use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use bstviz::{
    BinaryTree, DuplicatePolicy, InputError, LayoutNode, SearchPath, Session, Tree, TreeKind,
};
use clap::{Parser, Subcommand, ValueEnum};

/// Insert keys into a binary search tree and step through lookups.
///
/// With no KEYS an interactive prompt is started.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The tree variant to build.
    #[arg(short, long, value_enum, default_value_t = TreeKind::Unbalanced)]
    kind: TreeKind,

    /// Override how the tree handles keys already present.
    #[arg(short, long, value_enum)]
    duplicates: Option<DuplicatePolicy>,

    /// How to print the resulting tree.
    #[arg(short, long, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// After inserting KEYS, print the path a lookup of this key takes.
    #[arg(short, long, allow_negative_numbers = true)]
    search: Option<String>,

    /// Integer keys to insert, in order.
    #[arg(allow_negative_numbers = true)]
    keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// An indented text tree.
    Outline,
    /// The layout description as JSON.
    Json,
    /// A Graphviz digraph.
    Dot,
}

/// A single line of interactive input.
#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert one or more keys.
    #[command(alias = "i")]
    Insert {
        #[arg(required = true, allow_negative_numbers = true)]
        keys: Vec<String>,
    },
    /// Start stepping through the lookup of a key.
    #[command(alias = "s")]
    Search {
        #[arg(allow_negative_numbers = true)]
        key: String,
    },
    /// Advance the search one step.
    #[command(alias = "n")]
    Next,
    /// Move the search back one step.
    #[command(alias = "p")]
    Prev,
    /// Jump to the end of the search.
    Skip,
    /// Switch tree variant, discarding the current tree.
    Kind {
        #[arg(value_enum)]
        kind: TreeKind,
    },
    /// Discard the current tree.
    Reset,
    /// Print the current tree.
    Show {
        #[arg(value_enum, default_value_t = Format::Outline)]
        format: Format,
    },
    /// Leave the prompt.
    #[command(alias = "exit")]
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut session = Session::new(args.kind);
    if let Some(d) = args.duplicates {
        session = session.with_duplicates(d);
    }

    if args.keys.is_empty() {
        if args.search.is_some() {
            bail!("--search requires KEYS to search");
        }
        return repl(session);
    }

    for key in &args.keys {
        session.insert_input(key)?;
    }

    println!("{}", render(&session, args.format)?);

    if let Some(key) = args.search {
        let path = session.search_input(&key)?;
        println!("search: {} ({})", join(path.steps()), outcome(path));
    }

    Ok(())
}

fn repl(mut session: Session) -> Result<()> {
    // The session observer plays the part of the renderer, redrawing after
    // every change.
    session.on_change(|layout| match layout {
        Some(v) => print!("{}", outline(v)),
        None => println!("(empty)"),
    });

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", session.kind());
        std::io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            // EOF
            println!();
            return Ok(());
        };

        let Some(tokens) = shlex::split(&line) else {
            eprintln!("unbalanced quotes");
            continue;
        };
        if tokens.is_empty() {
            continue;
        }

        let command = match Line::try_parse_from(tokens) {
            Ok(v) => v.command,
            Err(e) => {
                e.print()?;
                continue;
            }
        };

        match handle(&mut session, command) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => match e.downcast_ref::<InputError>() {
                Some(_) => eprintln!("{e}"),
                None => return Err(e),
            },
        }
    }
}

/// Apply `command` to `session`, returning true if the prompt should exit.
fn handle(session: &mut Session, command: Command) -> Result<bool> {
    match command {
        Command::Insert { keys } => {
            for key in &keys {
                if !session.insert_input(key)? {
                    println!("{} ignored (already present)", key.trim());
                }
            }
        }
        Command::Search { key } => {
            let path = session.search_input(&key)?;
            println!("path: {}", join(path.steps()));
            print_step(session)?;
        }
        Command::Next => {
            session.step_forward()?;
            print_step(session)?;
        }
        Command::Prev => {
            session.step_back()?;
            print_step(session)?;
        }
        Command::Skip => {
            session.skip_search()?;
            print_step(session)?;
        }
        Command::Kind { kind } => session.select(kind),
        Command::Reset => session.reset(),
        Command::Show { format } => println!("{}", render(session, format)?),
        Command::Quit => return Ok(true),
    }

    Ok(false)
}

/// Print the highlighted step of the active search.
fn print_step(session: &Session) -> Result<()> {
    let Some(path) = session.active_search() else {
        bail!(InputError::NoActiveSearch);
    };
    let Some(key) = path.current() else {
        bail!(InputError::NotFound);
    };

    print!("step {}/{}: {}", path.position() + 1, path.len(), key);
    if path.is_finished() {
        print!(" ({})", outcome(path));
    }
    println!();

    Ok(())
}

fn render(session: &Session, format: Format) -> Result<String> {
    Ok(match format {
        Format::Outline => session
            .layout()
            .map(|v| outline(&v))
            .unwrap_or_else(|| "(empty)\n".to_string()),
        Format::Json => match session.layout() {
            Some(v) => v.to_json()?,
            None => "null".to_string(),
        },
        Format::Dot => match session.tree() {
            Some(t) => t.to_dot(),
            None => BinaryTree::<i64>::default().to_dot(),
        },
    })
}

/// Render `root` as an indented text tree, one node per line.
fn outline(root: &LayoutNode) -> String {
    let mut buf = String::new();

    // Each entry carries the indent of its line and the indent its own
    // children extend.
    let mut stack = vec![(root, String::new(), String::new())];
    while let Some((n, line_prefix, child_prefix)) = stack.pop() {
        buf.push_str(&line_prefix);
        buf.push_str(&n.label);
        if let Some(c) = n.color {
            buf.push_str(&format!(" ({c})"));
        }
        buf.push('\n');

        let last = n.children.len().saturating_sub(1);
        for (i, child) in n.children.iter().enumerate().rev() {
            let (connector, indent) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            stack.push((
                child,
                format!("{child_prefix}{connector}"),
                format!("{child_prefix}{indent}"),
            ));
        }
    }

    buf
}

fn outcome(path: &SearchPath<i64>) -> &'static str {
    if path.is_found() {
        "found"
    } else {
        "not found"
    }
}

fn join(keys: &[i64]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline() {
        let mut s = Session::new(TreeKind::RedBlack);
        for v in [10, 20, 30, 40] {
            s.insert(v);
        }

        let got = outline(&s.layout().unwrap());
        assert_eq!(
            got.lines().collect::<Vec<_>>(),
            [
                "20 (BLACK)",
                "├── 10 (BLACK)",
                "└── 30 (BLACK)",
                "    └── 40 (RED)",
            ]
        );
    }

    #[test]
    fn test_outline_chain() {
        let mut s = Session::new(TreeKind::Unbalanced);
        for v in 0..2_000 {
            s.insert(v);
        }

        let got = outline(&s.layout().unwrap());
        let lines = got.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2_000);
        assert_eq!(lines[1], "└── 1");
        assert_eq!(lines[2], "    └── 2");
        assert!(lines[1_999].ends_with("    └── 1999"));
    }

    #[test]
    fn test_args() {
        let argv = ["bstviz", "-k", "red-black", "--", "3", "-1"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.kind, TreeKind::RedBlack);
        assert_eq!(args.keys, ["3", "-1"]);
        assert_eq!(args.format, Format::Outline);
    }

    fn command(line: &[&str]) -> Command {
        Line::try_parse_from(line.iter().copied())
            .unwrap()
            .command
    }

    #[test]
    fn test_repl_commands() {
        let mut s = Session::new(TreeKind::Avl);

        let cmd = command(&["insert", "3", "-2", "5"]);
        assert!(!handle(&mut s, cmd).unwrap());
        assert_eq!(s.tree().unwrap().len(), 3);

        let cmd = command(&["search", "5"]);
        handle(&mut s, cmd).unwrap();
        let cmd = command(&["next"]);
        handle(&mut s, cmd).unwrap();
        assert_eq!(s.active_search().unwrap().current(), Some(&5));

        let cmd = command(&["insert", "nope"]);
        let err = handle(&mut s, cmd).unwrap_err();
        assert!(err.downcast_ref::<InputError>().is_some());

        let cmd = command(&["kind", "red-black"]);
        handle(&mut s, cmd).unwrap();
        assert_eq!(s.kind(), TreeKind::RedBlack);
        assert!(s.tree().is_none());

        let cmd = command(&["quit"]);
        assert!(handle(&mut s, cmd).unwrap());
    }
}
