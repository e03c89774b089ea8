use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use webidl_ts::Conversion;

/// `out.d.ts` -> `out.d.ts.report.md`
pub fn report_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(".report.md");
    PathBuf::from(name)
}

pub fn write_report(output_path: &Path, conversion: &Conversion) -> std::io::Result<PathBuf> {
    let path = report_path(output_path);
    fs::write(&path, render_report(conversion))?;
    Ok(path)
}

pub fn render_report(conversion: &Conversion) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for decl in conversion.declarations() {
        *counts.entry(decl.kind()).or_default() += 1;
    }

    let mut content = String::new();
    content.push_str("# webidl2ts report\n\n");
    content.push_str(&format!(
        "Converted {} definitions.\n\n",
        conversion.items.len()
    ));

    content.push_str("## Declarations\n\n");
    if counts.is_empty() {
        content.push_str("None.\n");
    } else {
        content.push_str("| kind | count |\n|---|---|\n");
        for (kind, count) in &counts {
            content.push_str(&format!("| {} | {} |\n", kind, count));
        }
    }
    content.push('\n');

    if conversion.diagnostics.is_empty() {
        content.push_str("No diagnostics.\n");
    } else {
        content.push_str("## Diagnostics\n\n");
        for d in &conversion.diagnostics {
            content.push_str(&format!("- {}\n\n", d));
            content.push_str("```json\n");
            content.push_str(&d.dump);
            content.push_str("\n```\n\n");
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use webidl_ts::{ConvertedItem, Declaration, Diagnostic, DiagnosticKind, TsType, TypeAlias};

    fn alias(name: &str) -> Declaration {
        Declaration::TypeAlias(TypeAlias {
            name: name.to_string(),
            ty: TsType::number(),
        })
    }

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path(Path::new("out/dom.d.ts")),
            PathBuf::from("out/dom.d.ts.report.md")
        );
    }

    #[test]
    fn test_render_report() {
        let conversion = Conversion {
            items: vec![
                ConvertedItem {
                    source: "A".to_string(),
                    declarations: vec![alias("A")],
                },
                ConvertedItem {
                    source: "B".to_string(),
                    declarations: vec![alias("B")],
                },
            ],
            diagnostics: vec![Diagnostic {
                kind: DiagnosticKind::UnsupportedDefinition,
                owner: None,
                dump: "{}".to_string(),
            }],
        };

        let report = render_report(&conversion);
        assert!(report.starts_with("# webidl2ts report\n\nConverted 2 definitions.\n"));
        assert!(report.contains("| type alias | 2 |\n"));
        assert!(report.contains("- Unsupported IDL type\n\n```json\n{}\n```\n"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = render_report(&Conversion::default());
        assert!(report.contains("None.\n"));
        assert!(report.contains("No diagnostics.\n"));
    }
}
