//! Console prompt plumbing

use std::io::Write;

/// Print the prompt and read one line from stdin.
///
/// EOF (ctrl-d, or exhausted piped input) reads as `exit` so the command
/// loop terminates instead of spinning on empty reads.
pub fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let bytes_read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if bytes_read == 0 {
        return Ok("exit".to_string());
    }
    Ok(buffer)
}
