//! Line-driven playground for watching an LRU cache reorder and evict.
//!
//! Run with: cargo run --bin lru_playground
//!
//! ```text
//! > capacity 2
//! cache initialized with capacity 2
//! (empty)  size 0/2
//! > put a 1
//! PUT (a, 1) -> added as MRU
//! [a:1 MRU]  size 1/2
//! ```

use std::io::{self, BufRead, Write};

use lrukit::builder::CacheBuilder;
use lrukit::outcome::{Outcome, RecencyRole};
use lrukit::policy::lru::LruCache;

const HELP: &str = "\
commands:
  capacity <n>       create a new cache holding n entries
  put <key> <value>  insert or update a key
  get <key>          look up a key
  show               redraw the cache
  stats              print operation counters (metrics feature)
  help               this text
  quit               exit";

/// Owns the cache being explored; replaced wholesale by `capacity`.
#[derive(Debug, Default)]
struct Session {
    cache: Option<LruCache<String, String>>,
}

enum Step {
    Continue(Vec<String>),
    Quit,
}

impl Session {
    fn handle(&mut self, line: &str) -> Step {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let lines = match command {
            "" => Vec::new(),
            "capacity" | "cap" => self.set_capacity(rest),
            "put" => self.put(rest),
            "get" => self.get(rest),
            "show" => match &self.cache {
                Some(cache) => vec![render(cache)],
                None => vec!["set capacity first".to_string()],
            },
            "stats" => self.stats(),
            "help" => vec![HELP.to_string()],
            "quit" | "exit" => return Step::Quit,
            other => vec![format!("unknown command '{}', try 'help'", other)],
        };
        Step::Continue(lines)
    }

    fn set_capacity(&mut self, arg: &str) -> Vec<String> {
        let built = arg
            .parse::<usize>()
            .ok()
            .and_then(|capacity| CacheBuilder::new(capacity).try_build::<String, String>().ok());
        match built {
            Some(cache) => {
                let outcome: Outcome<String, String> = Outcome::Initialized {
                    capacity: cache.capacity(),
                };
                let drawn = render(&cache);
                self.cache = Some(cache);
                vec![outcome.to_string(), drawn]
            },
            None => vec!["please enter a valid capacity".to_string()],
        }
    }

    fn put(&mut self, args: &str) -> Vec<String> {
        let Some(cache) = self.cache.as_mut() else {
            return vec!["set capacity first".to_string()];
        };
        let (key, value) = match args.split_once(char::is_whitespace) {
            Some((key, value)) if !value.trim().is_empty() => (key, value.trim()),
            _ => return vec!["enter both key and value".to_string()],
        };
        let outcome = cache.put_described(key.to_string(), value.to_string());
        vec![outcome.to_string(), render(cache)]
    }

    fn get(&mut self, args: &str) -> Vec<String> {
        let Some(cache) = self.cache.as_mut() else {
            return vec!["set capacity first".to_string()];
        };
        let key = args.split_whitespace().next().unwrap_or("");
        if key.is_empty() {
            return vec!["enter key".to_string()];
        }
        let outcome = cache.get_described(key.to_string());
        let result = match &outcome {
            Outcome::Hit { value, .. } => format!("value: {}", value),
            _ => "key not found".to_string(),
        };
        vec![result, outcome.to_string(), render(cache)]
    }

    #[cfg(feature = "metrics")]
    fn stats(&self) -> Vec<String> {
        match &self.cache {
            Some(cache) => {
                let snap = cache.metrics_snapshot();
                vec![format!(
                    "gets {} (hits {}, misses {}, hit rate {:.2}), puts {} (new {}, updated {}), evicted {}",
                    snap.get_calls,
                    snap.get_hits,
                    snap.get_misses,
                    snap.hit_rate(),
                    snap.insert_calls,
                    snap.insert_new,
                    snap.insert_updates,
                    snap.evicted_entries,
                )]
            },
            None => vec!["set capacity first".to_string()],
        }
    }

    #[cfg(not(feature = "metrics"))]
    fn stats(&self) -> Vec<String> {
        vec!["rebuild with --features metrics to collect counters".to_string()]
    }
}

/// Draws entries MRU first, e.g. `[b:2 MRU] -> [a:1 LRU]  size 2/2`.
fn render(cache: &LruCache<String, String>) -> String {
    let chain = if cache.is_empty() {
        "(empty)".to_string()
    } else {
        cache
            .iter_with_roles()
            .map(|(role, key, value)| match role {
                RecencyRole::Mid => format!("[{}:{}]", key, value),
                _ => format!("[{}:{} {}]", key, value, role),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    };
    format!("{}  size {}/{}", chain, cache.len(), cache.capacity())
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::default();

    writeln!(out, "lru playground, type 'help' for commands")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in stdin.lock().lines() {
        match session.handle(&line?) {
            Step::Quit => break,
            Step::Continue(lines) => {
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            },
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}
