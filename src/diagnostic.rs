//! User-facing diagnostic output on stderr.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use webidl_ts::Diagnostic;

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print every diagnostic to stderr. The full input dump is only shown when
/// `verbose` is set.
pub fn emit_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    let mut stderr = StandardStream::stderr(color_choice());
    let _ = write_diagnostics(&mut stderr, diagnostics, verbose);
}

/// Print a fatal error to stderr.
pub fn emit_error(err: &anyhow::Error) {
    let mut stderr = StandardStream::stderr(color_choice());
    let _ = write_error(&mut stderr, err);
}

pub(crate) fn write_diagnostics<W: WriteColor>(
    out: &mut W,
    diagnostics: &[Diagnostic],
    verbose: bool,
) -> io::Result<()> {
    for diagnostic in diagnostics {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(out, "warning")?;
        out.reset()?;
        writeln!(out, ": {}", diagnostic)?;
        if verbose {
            for line in diagnostic.dump.lines() {
                writeln!(out, "  | {}", line)?;
            }
        }
    }

    if !diagnostics.is_empty() {
        writeln!(
            out,
            "{} unsupported construct{} skipped",
            diagnostics.len(),
            if diagnostics.len() == 1 { "" } else { "s" }
        )?;
    }
    Ok(())
}

fn write_error<W: WriteColor>(out: &mut W, err: &anyhow::Error) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "error")?;
    out.reset()?;
    writeln!(out, ": {}", err)?;
    for cause in err.chain().skip(1) {
        writeln!(out, "  caused by: {}", cause)?;
    }
    Ok(())
}
