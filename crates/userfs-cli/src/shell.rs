//! Line-oriented command shell over a [`Namespace`].
//!
//! The shell only uses the public namespace API. Engine errors are printed
//! and the loop keeps going; only I/O failures on the shell's own input or
//! output end a session early.

use std::io::{self, BufRead, Write};

use tracing::debug;
use userfs_core::{FsError, FsResult, Namespace};

const HELP: &[&str] = &[
    "Commands: adduser <name>, user <name>, mkdir <path>, write <path> <text>,",
    "          cat <path>, ls <path>, mv <src> <dest>, chmod <mode> <path>,",
    "          stat <path>, whoami, help, exit",
];

/// Whether the shell should keep reading input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    fs: Namespace,
    current_user: Option<String>,
}

impl Shell {
    pub fn new(fs: Namespace) -> Self {
        Self {
            fs,
            current_user: None,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.fs
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn prompt(&self) -> String {
        match &self.current_user {
            Some(user) => format!("{user}> "),
            None => "(no user)> ".to_string(),
        }
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// With `echo` set, each command is written after its prompt, which keeps
    /// the transcript readable when input is not a terminal.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        echo: bool,
    ) -> io::Result<()> {
        writeln!(out, "=== In-Memory POSIX-like Filesystem CLI ===")?;
        for line in HELP {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;

        let mut line = String::new();
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out, "\nExiting.")?;
                return Ok(());
            }
            if echo {
                writeln!(out, "{}", line.trim_end())?;
            }
            if self.execute(&line, out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute a single command line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let (cmd, args) = match line.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (line, ""),
        };
        let cmd = cmd.to_lowercase();
        debug!(command = %cmd, args, "dispatching");

        match self.dispatch(&cmd, args, out) {
            Ok(flow) => Ok(flow),
            Err(FsError::Io(err)) => Err(err),
            Err(err) => {
                report(out, &err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, cmd: &str, args: &str, out: &mut W) -> FsResult<Flow> {
        match cmd {
            "exit" | "quit" => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
            "help" => {
                for line in HELP {
                    writeln!(out, "{line}")?;
                }
            }
            "adduser" => {
                if args.is_empty() {
                    writeln!(out, "Usage: adduser <username>")?;
                } else {
                    self.fs.create_user(args)?;
                    writeln!(out, "User '{args}' created.")?;
                }
            }
            "user" => {
                if args.is_empty() {
                    writeln!(out, "Usage: user <username>")?;
                } else if !self.fs.has_user(args) {
                    writeln!(out, "User '{args}' does not exist. Use 'adduser {args}' first.")?;
                } else {
                    self.current_user = Some(args.to_string());
                    writeln!(out, "Switched to user '{args}'")?;
                }
            }
            "whoami" => match &self.current_user {
                Some(user) => writeln!(out, "{user}")?,
                None => writeln!(out, "No user selected. Use 'user <name>' to switch.")?,
            },
            "mkdir" | "write" | "ls" | "list" | "read" | "cat" | "mv" | "move" | "chmod"
            | "stat" => {
                let Some(user) = self.current_user.clone() else {
                    writeln!(out, "Please select a user first with 'user <name>'")?;
                    return Ok(Flow::Continue);
                };
                self.dispatch_as(&user, cmd, args, out)?;
            }
            other => writeln!(out, "Unknown command: {other}")?,
        }
        Ok(Flow::Continue)
    }

    /// Commands that act on the namespace on behalf of `user`.
    fn dispatch_as<W: Write>(
        &mut self,
        user: &str,
        cmd: &str,
        args: &str,
        out: &mut W,
    ) -> FsResult<()> {
        match cmd {
            "mkdir" => {
                if args.is_empty() {
                    writeln!(out, "Usage: mkdir <path>")?;
                    return Ok(());
                }
                self.fs.mkdir(args, user)?;
                writeln!(out, "Directory '{args}' created.")?;
            }
            "write" => {
                let Some((path, text)) = args.split_once(char::is_whitespace) else {
                    writeln!(out, "Usage: write <path> <text>")?;
                    return Ok(());
                };
                self.fs.write_file(path, user, text.trim_start())?;
                writeln!(out, "File '{path}' written.")?;
            }
            "ls" | "list" => {
                let path = if args.is_empty() { "/" } else { args };
                let entries = self.fs.readdir(path, user)?;
                if entries.is_empty() {
                    writeln!(out, "(empty)")?;
                }
                for entry in entries {
                    let kind = if entry.is_dir() { "dir " } else { "file" };
                    writeln!(out, "  {kind} {}", entry.name)?;
                }
            }
            "read" | "cat" => {
                if args.is_empty() {
                    writeln!(out, "Usage: read <path>")?;
                    return Ok(());
                }
                let content = self.fs.read_file(args, user)?;
                writeln!(out, "{}", String::from_utf8_lossy(&content))?;
            }
            "mv" | "move" => {
                let parts: Vec<&str> = args.split_whitespace().collect();
                let [src, dest] = parts.as_slice() else {
                    writeln!(out, "Usage: mv <src_path> <dest_path>")?;
                    return Ok(());
                };
                self.fs.move_node(src, dest, user)?;
                writeln!(out, "Moved '{src}' to '{dest}'")?;
            }
            "chmod" => {
                let parts: Vec<&str> = args.split_whitespace().collect();
                let [mode, path] = parts.as_slice() else {
                    writeln!(out, "Usage: chmod <octal-mode> <path>")?;
                    return Ok(());
                };
                // from_str_radix alone lets a leading sign through
                let octal = mode.chars().all(|c| c.is_digit(8));
                let Some(mode) = octal.then(|| u32::from_str_radix(mode, 8).ok()).flatten()
                else {
                    writeln!(out, "Invalid mode: {mode}")?;
                    return Ok(());
                };
                self.fs.chmod(path, user, mode)?;
                writeln!(out, "Mode of '{path}' set to {:o}.", mode & 0o777)?;
            }
            "stat" => {
                if args.is_empty() {
                    writeln!(out, "Usage: stat <path>")?;
                    return Ok(());
                }
                let attrs = self.fs.stat(args, user)?;
                let json = serde_json::to_string(&attrs).map_err(io::Error::from)?;
                writeln!(out, "{json}")?;
            }
            _ => writeln!(out, "Unknown command: {cmd}")?,
        }
        Ok(())
    }
}

fn report<W: Write>(out: &mut W, err: &FsError) -> io::Result<()> {
    match err {
        FsError::PermissionDenied(reason) => writeln!(out, "Permission denied: {reason}"),
        FsError::NotFound(path) => writeln!(out, "Not found: {path}"),
        other => writeln!(out, "Error: {other}"),
    }
}
