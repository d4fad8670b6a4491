//! Interactive REPL for the tooldesk MCP server.
//!
//! Launch with `tooldesk-mcp repl` to enter interactive mode.
//! Type `/help` for available commands, Tab for completion.
//!
//! Tool calls run against an in-process dispatcher. The REPL itself is
//! blocking, so it is run off the async runtime and hops back onto it for
//! each call.

use std::sync::Arc;

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};
use tokio::runtime::Handle;

use crate::tools::{ToolService, Toolset};
use crate::types::{InitializeResult, ToolCallResult};

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/tools", "List tools in the current tool set"),
    ("/call", "Call a tool: /call <tool> {\"arg\": \"value\"}"),
    ("/info", "Show server capabilities"),
    ("/toolset", "Switch tool set (store is reseeded)"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
#[derive(Default)]
struct DeskHelper {
    tool_names: Vec<String>,
}

impl DeskHelper {
    fn candidates<'a>(
        options: impl Iterator<Item = &'a str>,
        prefix: &str,
    ) -> Vec<Pair> {
        options
            .filter(|o| o.starts_with(prefix))
            .map(|o| Pair {
                display: o.to_string(),
                replacement: format!("{o} "),
            })
            .collect()
    }
}

impl Completer for DeskHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
        // Only the first argument completes; JSON arguments are free-form.
        if args.contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let prefix_start = input.len() - args.len();

        match cmd {
            "/call" => Ok((
                prefix_start,
                Self::candidates(self.tool_names.iter().map(String::as_str), args),
            )),
            "/toolset" => Ok((
                prefix_start,
                Self::candidates(Toolset::ALL.iter().map(|t| t.name()), args),
            )),
            _ => Ok((pos, Vec::new())),
        }
    }
}

impl Hinter for DeskHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for DeskHelper {}
impl Validator for DeskHelper {}
impl Helper for DeskHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Session state.
struct ReplState {
    toolset: Toolset,
    tools: Arc<dyn ToolService>,
    runtime: Handle,
}

impl ReplState {
    fn tool_names(&self) -> Vec<String> {
        self.tools.definitions().into_iter().map(|d| d.name).collect()
    }
}

/// Run the interactive REPL. Must be called off the runtime's worker threads.
pub fn run(toolset: Toolset, runtime: Handle) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mtooldesk-mcp v{}\x1b[0m \x1b[90m\u{2014} tool set: {toolset}\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut state = ReplState {
        toolset,
        tools: toolset.service()?,
        runtime,
    };

    let mut rl: Editor<DeskHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(DeskHelper {
        tool_names: state.tool_names(),
    }));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".tooldesk_mcp_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    loop {
        let prompt = format!(" \x1b[36m{}>\x1b[0m ", state.toolset);
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let input = line.strip_prefix('/').unwrap_or(line);
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
                let args = args.trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "info" => cmd_info(&state),
                    "tools" => cmd_tools(&state),
                    "call" => cmd_call(args, &state),
                    "toolset" => {
                        if cmd_toolset(args, &mut state) {
                            if let Some(helper) = rl.helper_mut() {
                                helper.tool_names = state.tool_names();
                            }
                        }
                    }
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: Tab completes commands, tool names, and tool sets.");
    eprintln!();
}

fn cmd_info(state: &ReplState) {
    let capabilities = InitializeResult::default_result();
    eprintln!();
    eprintln!(
        "  Server:   {} v{}",
        capabilities.server_info.name, capabilities.server_info.version
    );
    eprintln!("  Protocol: {}", capabilities.protocol_version);
    eprintln!("  Tool set: {}", state.toolset);
    eprintln!("  Tools:    {}", state.tools.definitions().len());
    eprintln!();
}

fn cmd_tools(state: &ReplState) {
    let tools = state.tools.definitions();
    eprintln!();
    eprintln!("  {} tools in '{}':", tools.len(), state.toolset);
    eprintln!();
    for tool in &tools {
        eprintln!(
            "    {:<24} {}",
            tool.name,
            tool.description.as_deref().unwrap_or("")
        );
        let required = tool.input_schema["required"]
            .as_array()
            .map(|r| {
                r.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        if !required.is_empty() {
            eprintln!("    {:<24} \x1b[90mrequires: {required}\x1b[0m", "");
        }
    }
    eprintln!();
}

fn cmd_call(args: &str, state: &ReplState) {
    let (tool, json) = args.split_once(' ').unwrap_or((args, ""));
    if tool.is_empty() {
        eprintln!("  Usage: /call <tool> {{\"arg\": \"value\"}}");
        return;
    }

    let arguments = if json.trim().is_empty() {
        None
    } else {
        match serde_json::from_str::<serde_json::Value>(json) {
            Ok(value) => Some(value),
            Err(e) => {
                eprintln!("  Arguments are not valid JSON: {e}");
                return;
            }
        }
    };

    let result = state
        .runtime
        .block_on(state.tools.call(tool, arguments));

    match result {
        ToolCallResult::Success(_) => {
            eprintln!("  {}", pretty(&result.joined_text()));
        }
        ToolCallResult::Failure(message) => {
            eprintln!("  \x1b[31merror:\x1b[0m {message}");
        }
    }
}

/// Returns true when the tool set changed.
fn cmd_toolset(args: &str, state: &mut ReplState) -> bool {
    if args.is_empty() {
        eprintln!("  Current tool set: {}", state.toolset);
        return false;
    }

    let toolset: Toolset = match args.parse() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("  {e}");
            return false;
        }
    };

    match toolset.service() {
        Ok(tools) => {
            state.toolset = toolset;
            state.tools = tools;
            eprintln!("  Switched to '{toolset}' with a freshly seeded store.");
            true
        }
        Err(e) => {
            eprintln!("  Failed to build tool set: {e}");
            false
        }
    }
}

/// Re-indent JSON output for reading; plain text passes through.
fn pretty(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .filter(|v| v.is_object() || v.is_array())
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .map(|s| s.replace('\n', "\n  "))
        .unwrap_or_else(|| text.to_string())
}
