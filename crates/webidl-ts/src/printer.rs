//! Rendering of declaration nodes as `.d.ts` text.

use crate::ast::*;

/// Layout options for [`print`].
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Number of spaces per indentation level.
    pub indent_size: usize,
    /// Use tabs instead of spaces for indentation.
    pub use_tabs: bool,
    /// Start the output with a generated-file comment.
    pub header: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            use_tabs: false,
            header: true,
        }
    }
}

impl PrintOptions {
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    pub fn with_tabs(mut self) -> Self {
        self.use_tabs = true;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Get the indentation string for one level.
    pub fn indent_str(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_size)
        }
    }
}

pub const HEADER: &str = "// Auto-generated from WebIDL";

/// Render declarations in order, separated by blank lines.
pub fn print(declarations: &[Declaration], options: &PrintOptions) -> String {
    let mut printer = Printer::new(options);
    if options.header {
        printer.write(HEADER);
        printer.newline();
        if !declarations.is_empty() {
            printer.newline();
        }
    }
    printer.print_declarations(declarations);
    printer.output
}

/// Render a single type expression.
pub fn print_type(ty: &TsType) -> String {
    match ty {
        TsType::Keyword(keyword) => keyword.to_string(),
        TsType::Reference { name, type_args } if type_args.is_empty() => name.clone(),
        TsType::Reference { name, type_args } => {
            format!("{}<{}>", name, join_types(type_args))
        }
        TsType::Union(members) if members.is_empty() => "never".to_string(),
        TsType::Union(members) => members
            .iter()
            .map(|member| match member {
                TsType::Function(_) => format!("({})", print_type(member)),
                _ => print_type(member),
            })
            .collect::<Vec<_>>()
            .join(" | "),
        TsType::StringLiteral(value) => serde_json::Value::String(value.clone()).to_string(),
        TsType::Tuple(elements) => format!("[{}]", join_types(elements)),
        TsType::Function(f) => {
            format!("({}) => {}", print_params(&f.params), print_type(&f.return_type))
        }
        TsType::TypeQuery(name) => format!("typeof {}", name),
    }
}

fn join_types(types: &[TsType]) -> String {
    types.iter().map(print_type).collect::<Vec<_>>().join(", ")
}

fn print_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| {
            format!(
                "{}{}{}: {}",
                if p.rest { "..." } else { "" },
                p.name,
                if p.optional { "?" } else { "" },
                print_type(&p.ty)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

struct Printer<'a> {
    options: &'a PrintOptions,
    indent: usize,
    output: String,
    /// Inside a `declare namespace` block, where `declare` is implied.
    in_namespace: bool,
}

impl<'a> Printer<'a> {
    fn new(options: &'a PrintOptions) -> Self {
        Self {
            options,
            indent: 0,
            output: String::new(),
            in_namespace: false,
        }
    }

    fn print_declarations(&mut self, declarations: &[Declaration]) {
        for (i, decl) in declarations.iter().enumerate() {
            if i > 0 {
                self.newline();
            }
            self.print_declaration(decl);
        }
    }

    fn print_declaration(&mut self, decl: &Declaration) {
        self.write_indent();
        match decl {
            Declaration::Interface(i) => {
                self.write("interface ");
                self.write(&i.name);
                if !i.extends.is_empty() {
                    self.write(" extends ");
                    self.write(&join_types(&i.extends));
                }
                self.print_body(&i.members);
            }
            Declaration::Class(c) => {
                self.write_declare();
                self.write("class ");
                self.write(&c.name);
                if let Some((first, rest)) = c.extends.split_first() {
                    self.write(" extends ");
                    self.write(&print_type(first));
                    if !rest.is_empty() {
                        self.write(" implements ");
                        self.write(&join_types(rest));
                    }
                }
                self.print_body(&c.members);
            }
            Declaration::TypeAlias(t) => {
                self.write("type ");
                self.write(&t.name);
                self.write(" = ");
                self.write(&print_type(&t.ty));
                self.write(";");
                self.newline();
            }
            Declaration::Variable(v) => {
                self.write_declare();
                self.write(if v.is_const { "const " } else { "var " });
                self.write(&v.name);
                self.write(": ");
                self.write(&print_type(&v.ty));
                self.write(";");
                self.newline();
            }
            Declaration::Function(f) => {
                self.write_declare();
                self.write("function ");
                self.write(&f.name);
                self.write("(");
                self.write(&print_params(&f.params));
                self.write("): ");
                self.write(&print_type(&f.return_type));
                self.write(";");
                self.newline();
            }
            Declaration::Namespace(n) => {
                self.write_declare();
                self.write("namespace ");
                self.write(&n.name);
                if n.body.is_empty() {
                    self.write(" {}");
                    self.newline();
                    return;
                }
                self.write(" {");
                self.newline();

                let outer = self.in_namespace;
                self.in_namespace = true;
                self.indent += 1;
                self.print_declarations(&n.body);
                self.indent -= 1;
                self.in_namespace = outer;

                self.write_indent();
                self.write("}");
                self.newline();
            }
        }
    }

    fn print_body(&mut self, members: &[Member]) {
        if members.is_empty() {
            self.write(" {}");
            self.newline();
            return;
        }

        self.write(" {");
        self.newline();
        self.indent += 1;
        for member in members {
            self.write_indent();
            self.print_member(member);
            self.newline();
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
        self.newline();
    }

    fn print_member(&mut self, member: &Member) {
        match member {
            Member::Property(p) => {
                if p.is_static {
                    self.write("static ");
                }
                if p.readonly {
                    self.write("readonly ");
                }
                self.write(&p.name.to_string());
                if p.optional {
                    self.write("?");
                }
                self.write(": ");
                self.write(&print_type(&p.ty));
            }
            Member::Method(m) => {
                if m.is_static {
                    self.write("static ");
                }
                self.write(&m.name.to_string());
                self.write("(");
                self.write(&print_params(&m.params));
                self.write("): ");
                self.write(&print_type(&m.return_type));
            }
            Member::ConstructSignature(c) => {
                self.write("new (");
                self.write(&print_params(&c.params));
                self.write("): ");
                self.write(&print_type(&c.return_type));
            }
            Member::Constructor(c) => {
                self.write("constructor(");
                self.write(&print_params(&c.params));
                self.write(")");
            }
            Member::IndexSignature(s) => {
                if s.readonly {
                    self.write("readonly ");
                }
                self.write("[");
                self.write(&s.key_name);
                self.write(": ");
                self.write(&print_type(&s.key_type));
                self.write("]: ");
                self.write(&print_type(&s.value_type));
            }
        }
        self.write(";");
    }

    fn write_declare(&mut self) {
        if !self.in_namespace {
            self.write("declare ");
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_indent(&mut self) {
        let indent_str = self.options.indent_str();
        for _ in 0..self.indent {
            self.output.push_str(&indent_str);
        }
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }
}
