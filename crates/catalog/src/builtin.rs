//! Code-intelligence tool set shipped with the router.

use crate::catalog::Catalog;
use crate::entry::ToolEntry;

fn builtin_tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            "skeleton",
            "Extract code structure showing classes, functions and method signatures",
        )
        .keywords(["structure", "outline", "overview", "signatures", "classes", "functions"])
        .parameters(["file_path", "depth"]),
        ToolEntry::new(
            "expand",
            "Show the full source code of a single symbol",
        )
        .keywords(["source", "body", "implementation", "full"])
        .parameters(["symbol", "file_path"]),
        ToolEntry::new("view", "View a file or a range of lines from a file")
            .keywords(["open", "display", "lines", "contents"])
            .parameters(["file_path", "start_line", "end_line"]),
        ToolEntry::new(
            "deps",
            "Show module imports, exports and the dependency graph of a file",
        )
        .keywords(["imports", "dependencies", "exports", "requires", "modules"])
        .parameters(["file_path"]),
        ToolEntry::new(
            "cfg",
            "Build the control flow graph of a function with branches and loops",
        )
        .keywords(["control", "flow", "branches", "loops", "paths"])
        .parameters(["file_path", "symbol"]),
        ToolEntry::new(
            "anchors",
            "Locate anchor points such as definitions of named symbols in a file",
        )
        .keywords(["anchor", "locate", "definition", "position", "location"])
        .parameters(["file_path", "symbol"]),
        ToolEntry::new(
            "query",
            "Query the codebase for symbols matching a type, name or pattern",
        )
        .keywords(["search", "symbols", "filter", "match"])
        .parameters(["pattern", "kind"]),
        ToolEntry::new("grep", "Search file contents for a text or regular expression pattern")
            .keywords(["text", "regex", "occurrences", "string"])
            .parameters(["pattern", "file_path"]),
        ToolEntry::new("callers", "Find every function that calls the given symbol")
            .keywords(["callers", "usages", "references", "incoming", "called"])
            .parameters(["symbol"]),
        ToolEntry::new("callees", "List the functions called by the given symbol")
            .keywords(["callees", "calls", "outgoing", "invokes"])
            .parameters(["symbol"]),
        ToolEntry::new(
            "complexity",
            "Measure cyclomatic complexity of functions to spot hotspots",
        )
        .keywords(["cyclomatic", "metrics", "hotspots", "complex"])
        .parameters(["file_path"]),
        ToolEntry::new("validate", "Run linters and checks to validate the code")
            .keywords(["lint", "check", "errors", "warnings", "verify"])
            .parameters(["file_path"]),
        ToolEntry::new("apply_patch", "Apply a unified diff patch to a file")
            .keywords(["patch", "diff", "edit", "modify", "change"])
            .parameters(["file_path", "patch"]),
        ToolEntry::new("todo_list", "List open todo items and tasks tracked in the project")
            .keywords(["todo", "tasks", "backlog", "pending"])
            .parameters(["status"]),
    ]
}

const BUILTIN_TOOL_ALIASES: &[(&str, &str)] = &[
    ("skel", "skeleton"),
    ("structure", "skeleton"),
    ("outline", "skeleton"),
    ("read", "expand"),
    ("imports", "deps"),
    ("dependencies", "deps"),
    ("calls", "callees"),
    ("check", "validate"),
    ("lint", "validate"),
    ("patch", "apply_patch"),
    ("fix", "apply_patch"),
    ("edit", "apply_patch"),
    ("todos", "todo_list"),
];

const BUILTIN_PARAMETER_ALIASES: &[(&str, &str)] = &[
    ("path", "file_path"),
    ("file", "file_path"),
    ("filename", "file_path"),
    ("sym", "symbol"),
    ("name", "symbol"),
    ("function", "symbol"),
    ("regex", "pattern"),
    ("diff", "patch"),
];

impl Catalog {
    /// The built-in code-intelligence catalog with its verb and parameter aliases
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            tools: builtin_tools(),
            tool_aliases: BUILTIN_TOOL_ALIASES
                .iter()
                .map(|(alias, tool)| ((*alias).to_string(), (*tool).to_string()))
                .collect(),
            parameter_aliases: BUILTIN_PARAMETER_ALIASES
                .iter()
                .map(|(alias, param)| ((*alias).to_string(), (*param).to_string()))
                .collect(),
        }
    }
}
