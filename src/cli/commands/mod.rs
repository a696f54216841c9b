//! Command execution.
//!
//! Runs the publish workflow and turns its outcome into an exit code with
//! user feedback.

mod publish;

use crate::cli::{Args, OutputManager};
use crate::error::Result;

use publish::execute_publish;

/// Execute the publish command for parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.quiet);

    match execute_publish(&args, &output).await {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&format!("Release failed: {}", e));

            // Show recovery suggestions if available
            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.error_indent("💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.error_indent(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
