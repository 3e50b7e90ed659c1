// Terminal input and the terminal side of workflow callbacks

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::sync::Mutex;

use crate::navigation::{Navigator, Route};
use crate::workflows::Confirmation;

/// Read one trimmed line after printing `label`
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    let read = std::io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        bail!("Input closed while waiting for {label}");
    }
    Ok(input.trim().to_string())
}

/// Keep asking until a non-empty answer is given
pub fn prompt_required(label: &str) -> Result<String> {
    loop {
        let answer = prompt(label)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        println!("⚠️  {label} is required");
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints where the user should continue
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "Navigating");
        println!("➡️  Continue at {route}");
    }
}

/// Holds navigation requests until the caller has printed its own outcome
#[derive(Default)]
pub struct DeferredNavigator {
    pending: Mutex<Vec<Route>>,
}

impl DeferredNavigator {
    /// Drain queued routes in request order
    pub fn take(&self) -> Vec<Route> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    pub fn flush(&self) {
        for route in self.take() {
            TerminalNavigator.navigate(route);
        }
    }
}

impl Navigator for DeferredNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(route);
        }
    }
}

/// Asks on stdin, or approves everything when constructed with `assume_yes`
pub struct TerminalConfirmation {
    assume_yes: bool,
}

impl TerminalConfirmation {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match prompt(&format!("{question} [y/N]")) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation, treating as no");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn deferred_routes_are_released_once() {
        let navigator = DeferredNavigator::default();
        navigator.navigate(Route::Dashboard);
        navigator.navigate(Route::ArticleList);

        assert_eq!(navigator.take(), vec![Route::Dashboard, Route::ArticleList]);
        assert!(navigator.take().is_empty());
    }

    #[test]
    fn assume_yes_never_prompts() {
        assert!(TerminalConfirmation::new(true).confirm("Delete everything?"));
    }
}
