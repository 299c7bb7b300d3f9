//! The definition loader.
//!
//! A single forward pass over the token matrix populates the function,
//! class, and trait registries, evaluates top-level variable declarations
//! into globals, and resolves `include` directives recursively. Every other
//! line is collected, in order, as the script body handed to the statement
//! executor — block statements keep their interior lines intact so nothing
//! inside a top-level `while` is hoisted.

use std::fs;

use crate::{
    class::{ClassAttr, ClassDef, ClassMethod, TraitDef, TraitImpl},
    error::{RunError, RunResult},
    exec::kw,
    function::Function,
    io::PrintWriter,
    namespace::Locals,
    parse::{between_chars, brace_delta, join_tokens, split_lines, string_raw},
    run::Interp,
    value::{is_type_keyword, zero_of},
};

impl Interp {
    /// Loads every definition in `lines` and returns the residual script
    /// body.
    pub(crate) fn load_definitions(
        &mut self,
        lines: &[Vec<String>],
        print: &mut impl PrintWriter,
    ) -> RunResult<Vec<Vec<String>>> {
        let mut body = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let first = lines[i][0].as_str();
            if kw(first, "include") {
                let path = string_raw(lines[i].get(1).map_or("", String::as_str));
                let source = fs::read_to_string(&path).map_err(|err| RunError::Script {
                    path: path.clone(),
                    detail: err.to_string(),
                })?;
                let sub_lines = split_lines(&source);
                let sub_body = self.load_definitions(&sub_lines, print)?;
                body.extend(sub_body);
            } else if kw(first, "func") {
                self.load_function(lines, &mut i);
            } else if kw(first, "class") {
                self.load_class(lines, &mut i, print)?;
            } else if kw(first, "trait") {
                self.load_trait(lines, &mut i);
            } else if kw(first, "impl") {
                self.load_impl(lines, &mut i);
            } else if kw(first, "global") && lines[i].len() >= 3 {
                let words = &lines[i];
                let name = words[2].clone();
                let rhs = if words.len() > 4 {
                    join_tokens(&words[4..])
                } else {
                    String::new()
                };
                let mut scratch = Locals::default();
                let value = self.eval(&rhs, &mut scratch, print)?;
                self.namespaces.globals.insert(name, value);
            } else if (is_type_keyword(first) || self.namespaces.is_class(first)) && lines[i].len() >= 2 {
                let words = &lines[i];
                let name = words[1].clone();
                let rhs = if words.len() > 3 {
                    join_tokens(&words[3..])
                } else {
                    String::new()
                };
                let mut scratch = Locals::default();
                let value = self.eval(&rhs, &mut scratch, print)?;
                self.namespaces.globals.insert(name, value);
            } else {
                // Statement line. Block statements carry their interior
                // (including closing braces) into the body verbatim.
                body.push(lines[i].clone());
                let mut depth = brace_delta(&lines[i]);
                while i + 1 < lines.len() && depth > 0 {
                    i += 1;
                    depth += brace_delta(&lines[i]);
                    body.push(lines[i].clone());
                }
            }
            i += 1;
        }
        Ok(body)
    }

    fn load_function(&mut self, lines: &[Vec<String>], i: &mut usize) {
        let words = &lines[*i];
        let Some(header) = words.get(1) else { return };
        let name = header.split('(').next().unwrap_or("").to_owned();
        let joined = join_tokens(words);
        let arg_list = between_chars(&joined, '(', ')').replace(' ', "");
        let params: Vec<String> = arg_list.split(',').filter(|p| !p.is_empty()).map(str::to_owned).collect();

        let mut body = vec![params.clone()];
        body.extend(gather_block(lines, i));
        self.namespaces.functions.insert(name, Function { params, body });
    }

    fn load_class(&mut self, lines: &[Vec<String>], i: &mut usize, print: &mut impl PrintWriter) -> RunResult<()> {
        let words = &lines[*i];
        let Some(name) = words.get(1).cloned() else { return Ok(()) };
        let mut class = ClassDef::new(name.clone());
        if words.len() >= 4 && words[2] == ":" {
            class.superclass = Some(words[3].trim_end_matches('{').to_owned());
        }

        let body_lines = gather_block(lines, i);
        let (methods, attr_lines) = collect_methods(&body_lines);
        class.methods = methods;

        for line in attr_lines {
            let mut tokens: &[String] = &line;
            let is_static = kw(&tokens[0], "static");
            if is_static {
                tokens = &tokens[1..];
            }
            if tokens.len() < 2 {
                continue;
            }
            let ty = tokens[0].clone();
            let attr_name = tokens[1].trim_end_matches(';').to_owned();
            let default_value = if tokens.len() > 3 && tokens[2] == "=" {
                let rhs = join_tokens(&tokens[3..]);
                let rhs = rhs.trim_end_matches(';').trim().to_owned();
                let mut scratch = Locals::default();
                self.eval(&rhs, &mut scratch, print)?
            } else {
                zero_of(&ty)
            };
            if is_static {
                class.static_attrs.insert(attr_name, default_value);
            } else {
                class.attributes.push(ClassAttr {
                    name: attr_name,
                    default_value,
                    is_static: false,
                });
            }
        }

        self.namespaces.classes.insert(name, class);
        Ok(())
    }

    fn load_trait(&mut self, lines: &[Vec<String>], i: &mut usize) {
        let words = &lines[*i];
        let Some(name) = words.get(1) else { return };
        let name = name.trim_end_matches('{').to_owned();
        let body = gather_block(lines, i);
        self.namespaces.traits.insert(name.clone(), TraitDef { name, body });
    }

    fn load_impl(&mut self, lines: &[Vec<String>], i: &mut usize) {
        let words = &lines[*i];
        let Some(trait_name) = words.get(1).cloned() else { return };
        let type_name = if words.len() >= 4 && kw(&words[2], "for") {
            words[3].trim_end_matches('{').to_owned()
        } else {
            String::new()
        };
        let body = gather_block(lines, i);
        let (methods, _) = collect_methods(&body);
        self.namespaces.trait_impls.push(TraitImpl {
            trait_name,
            type_name,
            methods,
        });
    }
}

/// Consumes the brace-balanced block opened on `lines[*i]`, leaving `i` on
/// the balancing line and returning the interior lines.
fn gather_block(lines: &[Vec<String>], i: &mut usize) -> Vec<Vec<String>> {
    let mut depth = brace_delta(&lines[*i]);
    let mut contents = Vec::new();
    while *i + 1 < lines.len() && depth > 0 {
        *i += 1;
        depth += brace_delta(&lines[*i]);
        if depth <= 0 {
            break;
        }
        contents.push(lines[*i].clone());
    }
    contents
}

/// Separates a class or impl body into its methods (a line whose token embeds
/// `(...)` plus the brace-balanced lines below it) and the remaining
/// attribute lines.
fn collect_methods(body_lines: &[Vec<String>]) -> (Vec<ClassMethod>, Vec<Vec<String>>) {
    let mut methods = Vec::new();
    let mut rest = Vec::new();
    let mut j = 0;
    while j < body_lines.len() {
        let line = &body_lines[j];
        let header = line.iter().find(|t| t.contains('(') && t.contains(')'));
        if let Some(header) = header {
            let name = header.split('(').next().unwrap_or("").to_owned();
            if !name.is_empty() {
                let params: Vec<String> = between_chars(header, '(', ')')
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_owned)
                    .collect();
                let is_static = kw(&line[0], "static");
                let mut body = vec![line.clone()];
                let mut depth = brace_delta(line);
                while j + 1 < body_lines.len() && depth > 0 {
                    j += 1;
                    depth += brace_delta(&body_lines[j]);
                    if depth <= 0 {
                        break;
                    }
                    body.push(body_lines[j].clone());
                }
                methods.push(ClassMethod {
                    name,
                    params,
                    body,
                    is_static,
                });
                j += 1;
                continue;
            }
        }
        rest.push(line.clone());
        j += 1;
    }
    (methods, rest)
}
