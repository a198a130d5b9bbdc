//! TypeScript/JavaScript symbol extractor with modular architecture
//!
//! Builds the symbol inventory of one source file and the workspace-internal
//! dependency edges of every executable body in it:
//!
//! - **classify**: which nodes are symbols, and of what kind
//! - **declarations**: top-level declaration walk (through `export`/`declare`)
//! - **classes**: classes and their methods
//! - **functions**: function declarations, arrow functions, factory variables
//! - **interfaces**: interfaces and type aliases
//! - **relationships**: call-site identifier resolution into edges
//! - **workspace_filter**: keeps only edges into the workspace
//! - **helpers**: small node inspections
//!
//! Records come out in a fixed order: classes (methods first, then the class),
//! functions, arrow functions, factory variables, type aliases, interfaces.

mod classes;
pub mod classify;
mod declarations;
mod functions;
mod helpers;
mod interfaces;
pub(crate) mod relationships;
pub mod workspace_filter;

use crate::extractors::base::{
    BaseExtractor, CodeSymbolDependencies, CodeSymbolInformation, ExtractionConfig,
};
use crate::project::{ResolveError, SourceFile, SymbolResolver};
use tracing::debug;

/// Main TypeScript extractor that orchestrates the extraction passes
pub struct TypeScriptExtractor<'a> {
    base: BaseExtractor,
    resolver: &'a dyn SymbolResolver,
    source_file: &'a SourceFile,
}

impl<'a> TypeScriptExtractor<'a> {
    pub fn new(
        resolver: &'a dyn SymbolResolver,
        source_file: &'a SourceFile,
        workspace_root: &str,
        original_file_path: &str,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            base: BaseExtractor::new(
                source_file.language().to_string(),
                source_file.path(),
                original_file_path.to_string(),
                workspace_root.to_string(),
                source_file.content().to_string(),
                config,
            ),
            resolver,
            source_file,
        }
    }

    /// Extract every symbol record of the file, in output order
    pub fn extract_symbols(&mut self) -> Result<Vec<CodeSymbolInformation>, ResolveError> {
        let source_file = self.source_file;
        let root = source_file.tree().root_node();

        let mut symbols = classes::extract_classes(self, root)?;
        let class_count = symbols.len();
        symbols.extend(functions::extract_functions(self, root)?);
        symbols.extend(functions::extract_arrow_functions(self, root)?);
        symbols.extend(functions::extract_factory_variables(self, root));
        let function_count = symbols.len() - class_count;
        symbols.extend(interfaces::extract_type_aliases(self, root));
        symbols.extend(interfaces::extract_interfaces(self, root));

        debug!(
            "{}: {} symbols ({} from classes, {} functions)",
            self.base.file_path,
            symbols.len(),
            class_count,
            function_count
        );
        Ok(symbols)
    }

    /// Dependencies of every block in the file, all attributed to
    /// `block_symbol_name`
    pub fn extract_block_dependencies(
        &self,
        block_symbol_name: &str,
    ) -> Result<Vec<CodeSymbolDependencies>, ResolveError> {
        let root = self.source_file.tree().root_node();
        relationships::collect_block_dependencies(self, root, block_symbol_name)
    }

    // ========================================================================
    // Access for sub-modules
    // ========================================================================

    pub(crate) fn base_mut(&mut self) -> &mut BaseExtractor {
        &mut self.base
    }

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }

    pub(crate) fn resolver(&self) -> &'a dyn SymbolResolver {
        self.resolver
    }

    pub(crate) fn source_file(&self) -> &'a SourceFile {
        self.source_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{CodeSymbolKind, ExtractionOutput, TypescriptCodeType};
    use crate::project::{Declaration, ImportBinding, ImportedName, Project, ResolvedSymbol};
    use tree_sitter::Node;

    fn project(files: &[(&str, &str)]) -> Project {
        let mut project = Project::new();
        for (path, content) in files {
            project.add_source_file(path, *content).unwrap();
        }
        project
    }

    fn extract_with(resolver: &dyn SymbolResolver, file: &SourceFile) -> Vec<CodeSymbolInformation> {
        TypeScriptExtractor::new(resolver, file, "/ws", file.path(), ExtractionConfig::default())
            .extract_symbols()
            .unwrap()
    }

    fn extract(files: &[(&str, &str)], target: &str) -> Vec<CodeSymbolInformation> {
        let project = project(files);
        let file = project.get_source_file(target).unwrap();
        extract_with(&project, file)
    }

    fn names(symbols: &[CodeSymbolInformation]) -> Vec<&str> {
        symbols.iter().map(|s| s.symbol_name.as_str()).collect()
    }

    fn edge_targets(symbol: &CodeSymbolInformation) -> Vec<&str> {
        symbol
            .dependencies
            .iter()
            .flat_map(|d| d.edges.iter().map(|e| e.code_symbol_name.as_str()))
            .collect()
    }

    #[test]
    fn test_class_methods_then_class_with_linkage() {
        let symbols = extract(
            &[(
                "/ws/src/foo.ts",
                "export class Foo {\n  bar() { this.baz(); }\n  baz() {}\n}\n",
            )],
            "/ws/src/foo.ts",
        );
        assert_eq!(names(&symbols), vec!["src.foo.Foo.bar", "src.foo.Foo.baz", "src.foo.Foo"]);

        let bar = &symbols[0];
        assert_eq!(bar.symbol_kind, CodeSymbolKind::Method);
        assert_eq!(bar.extra_symbol_hint, Some(TypescriptCodeType::ClassMethod));
        assert_eq!(bar.display_name, "bar()");
        assert_eq!(bar.code_snippet.code, "{ this.baz(); }");
        assert_eq!(edge_targets(bar), vec!["src.foo.Foo.baz"]);
        assert_eq!(bar.dependencies[0].code_symbol_name, "src.foo.Foo.bar");
        assert_eq!(bar.dependencies[0].edges[0].file_path, "/ws/src/foo.ts");

        let class = &symbols[2];
        assert_eq!(class.symbol_kind, CodeSymbolKind::Class);
        assert_eq!(class.display_name, "class Foo");
        assert_eq!(class.code_snippet.code, "");
        assert_eq!((class.symbol_start_line, class.symbol_end_line), (1, 4));
        assert_eq!(edge_targets(class), vec!["src.foo.Foo.bar", "src.foo.Foo.baz"]);
        assert!(class
            .dependencies
            .iter()
            .all(|d| d.code_symbol_name == "src.foo.Foo"
                && d.code_symbol_kind == CodeSymbolKind::Function));
    }

    #[test]
    fn test_imported_workspace_call_becomes_edge_and_external_call_does_not() {
        let symbols = extract(
            &[
                (
                    "/ws/src/main.ts",
                    r#"
import { helper } from './util';
import { readFile } from 'fs';
export function main() {
  helper();
  readFile('x');
  console.log('done');
}
"#,
                ),
                ("/ws/src/util.ts", "export function helper() {}\n"),
            ],
            "/ws/src/main.ts",
        );
        assert_eq!(names(&symbols), vec!["src.main.main"]);
        let main = &symbols[0];
        assert_eq!(edge_targets(main), vec!["src.util.helper"]);
        assert_eq!(main.dependencies[0].edges[0].file_path, "/ws/src/util.ts");
    }

    #[test]
    fn test_declarations_outside_root_are_external() {
        let symbols = extract(
            &[
                (
                    "/ws/src/main.ts",
                    "import { shared } from '../../other/lib';\nfunction run() { shared(); }\n",
                ),
                ("/other/lib.ts", "export function shared() {}\n"),
            ],
            "/ws/src/main.ts",
        );
        assert!(symbols[0].dependencies.is_empty());
    }

    #[test]
    fn test_nested_arrow_is_not_extracted() {
        let symbols = extract(
            &[(
                "/ws/src/a.ts",
                "const f = () => { const g = () => 1; return g(); };\n",
            )],
            "/ws/src/a.ts",
        );
        assert_eq!(names(&symbols), vec!["src.a.f"]);
        let f = &symbols[0];
        assert_eq!(f.extra_symbol_hint, Some(TypescriptCodeType::ArrowFunction));
        assert_eq!(f.display_name, "f callback()");
        // g is a local of f
        assert!(f.dependencies.is_empty());
    }

    #[test]
    fn test_factory_variable_is_not_double_counted() {
        let symbols = extract(
            &[(
                "/ws/src/cookies.ts",
                r#"
export const revisit = createCookie("revisit", {
  maxAge: 24 * 60 * 60,
});
const handler = () => { revisit.parse(); };
"#,
            )],
            "/ws/src/cookies.ts",
        );
        assert_eq!(names(&symbols), vec!["src.cookies.handler", "src.cookies.revisit"]);

        let revisit = &symbols[1];
        assert_eq!(revisit.symbol_kind, CodeSymbolKind::Function);
        assert_eq!(revisit.extra_symbol_hint, Some(TypescriptCodeType::Function));
        assert_eq!(revisit.display_name, "revisit()");
        assert!(revisit.code_snippet.code.starts_with("revisit = createCookie("));
        assert_eq!((revisit.symbol_start_line, revisit.symbol_end_line), (2, 4));
        assert!(revisit.dependencies.is_empty());
    }

    #[test]
    fn test_extraction_order() {
        let symbols = extract(
            &[(
                "/ws/src/order.ts",
                r#"
interface Options { verbose: boolean }
type Id = string;
const client = connect();
const onReady = () => start();
function start() {}
class App { run() {} }
"#,
            )],
            "/ws/src/order.ts",
        );
        assert_eq!(
            names(&symbols),
            vec![
                "src.order.App.run",
                "src.order.App",
                "src.order.start",
                "src.order.onReady",
                "src.order.client",
                "src.order.Id",
                "src.order.Options",
            ]
        );
        let on_ready = &symbols[3];
        assert_eq!(on_ready.code_snippet.code, "start()");
        assert_eq!(edge_targets(on_ready), vec!["src.order.start"]);

        let alias = &symbols[5];
        assert_eq!(alias.symbol_kind, CodeSymbolKind::TypeParameter);
        assert_eq!(alias.display_name, "type Id");
        assert_eq!(alias.code_snippet.code, "type Id = string;");

        let interface = &symbols[6];
        assert_eq!(interface.symbol_kind, CodeSymbolKind::Interface);
        assert_eq!(interface.display_name, "interface Options");
    }

    #[test]
    fn test_class_arrow_and_callback_arrow() {
        let symbols = extract(
            &[(
                "/ws/src/view.ts",
                r#"
class View {
  render = () => this.draw();
  draw() {}
}
function boot() {}
register(() => { boot(); });
"#,
            )],
            "/ws/src/view.ts",
        );
        assert_eq!(
            names(&symbols),
            vec![
                "src.view.View.draw",
                "src.view.View",
                "src.view.boot",
                "src.view.View.render",
                "src.view.register",
            ]
        );
        let render = &symbols[3];
        assert_eq!(render.extra_symbol_hint, Some(TypescriptCodeType::ClassArrowFunction));
        assert_eq!(edge_targets(render), vec!["src.view.View.draw"]);

        let callback = &symbols[4];
        assert_eq!(callback.display_name, "register callback()");
        assert_eq!(edge_targets(callback), vec!["src.view.boot"]);
    }

    #[test]
    fn test_constructor_callback_is_named_after_constructor() {
        let symbols = extract(
            &[(
                "/ws/src/a.ts",
                "function settle() {}\nexport const p = new Promise((resolve) => { settle(); });\n",
            )],
            "/ws/src/a.ts",
        );
        assert_eq!(names(&symbols), vec!["src.a.settle", "src.a.Promise"]);
        let callback = &symbols[1];
        assert_eq!(callback.display_name, "Promise callback()");
        assert_eq!(edge_targets(callback), vec!["src.a.settle"]);
    }

    #[test]
    fn test_renamed_import_resolves_to_original_name() {
        let symbols = extract(
            &[
                (
                    "/ws/src/main.ts",
                    "import { helper as h } from './util';\nexport function run() { h(); }\n",
                ),
                ("/ws/src/util.ts", "export function helper() {}\n"),
            ],
            "/ws/src/main.ts",
        );
        assert_eq!(edge_targets(&symbols[0]), vec!["src.util.helper"]);
        assert_eq!(symbols[0].dependencies[0].edges[0].file_path, "/ws/src/util.ts");
    }

    #[test]
    fn test_package_reexported_through_diamond_is_skipped() {
        let symbols = extract(
            &[
                (
                    "/ws/main.ts",
                    r#"
import { debounce } from './index';
function local() {}
export function run() { debounce(); local(); }
"#,
                ),
                ("/ws/index.ts", "export * from './a';\nexport * from './b';\n"),
                ("/ws/a.ts", "export * from './shared';\n"),
                ("/ws/b.ts", "export { debounce } from './shared';\n"),
                ("/ws/shared.ts", "export { debounce } from 'lodash';\n"),
            ],
            "/ws/main.ts",
        );
        assert_eq!(names(&symbols), vec!["main.local", "main.run"]);
        assert_eq!(edge_targets(&symbols[1]), vec!["main.local"]);
    }

    #[test]
    fn test_switch_local_shadows_module_function() {
        let symbols = extract(
            &[(
                "/ws/a.ts",
                r#"
function helper() {}
export function run(k: number) {
  switch (k) {
    case 1:
      const helper = () => 0;
      helper();
  }
}
"#,
            )],
            "/ws/a.ts",
        );
        assert_eq!(names(&symbols), vec!["a.helper", "a.run"]);
        assert!(symbols[1].dependencies.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_disambiguated() {
        let symbols = extract(
            &[(
                "/ws/src/dup.js",
                "class Parser {\n  parse(a) {}\n  parse(a, b) {}\n}\n",
            )],
            "/ws/src/dup.js",
        );
        assert_eq!(
            names(&symbols),
            vec!["src.dup.Parser.parse", "src.dup.Parser.parse#2", "src.dup.Parser"]
        );
        assert_eq!(
            edge_targets(&symbols[2]),
            vec!["src.dup.Parser.parse", "src.dup.Parser.parse#2"]
        );
    }

    #[test]
    fn test_repeated_calls_are_not_deduplicated() {
        let symbols = extract(
            &[(
                "/ws/src/a.ts",
                "function step() {}\nfunction run() { step(); step(); }\n",
            )],
            "/ws/src/a.ts",
        );
        assert_eq!(edge_targets(&symbols[1]), vec!["src.a.step", "src.a.step"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let project = project(&[
            ("/ws/src/a.ts", "import { b } from './b';\nexport class A { run() { b(); } }\n"),
            ("/ws/src/b.ts", "export const b = () => 1;\n"),
        ]);
        let file = project.get_source_file("/ws/src/a.ts").unwrap();
        let first = extract_with(&project, file);
        let second = extract_with(&project, file);
        assert_eq!(first, second);
        assert_eq!(edge_targets(&first[0]), vec!["src.b.b"]);
    }

    #[test]
    fn test_wire_output_uses_numeric_kinds() {
        let symbols = extract(&[("/ws/a.ts", "class A {}\n")], "/ws/a.ts");
        let json = ExtractionOutput::new(symbols).to_json().unwrap();
        assert!(json.starts_with("{\"output\":["));
        assert!(json.contains("\"symbolKind\":4"));
        assert!(json.contains("\"extraSymbolHint\":\"typescript.class\""));
    }

    #[test]
    fn test_block_dependencies_cover_the_whole_file() {
        let project = project(&[(
            "/ws/src/a.ts",
            "function step() {}\nif (ready) { step(); }\nfunction run() { step(); }\n",
        )]);
        let file = project.get_source_file("/ws/src/a.ts").unwrap();
        let extractor =
            TypeScriptExtractor::new(&project, file, "/ws", file.path(), ExtractionConfig::default());
        let dependencies = extractor.extract_block_dependencies("src.a").unwrap();
        // step() has an empty block, the other two blocks call it once each
        assert_eq!(dependencies.len(), 2);
        assert!(dependencies.iter().all(|d| d.code_symbol_name == "src.a"
            && d.edges[0].code_symbol_name == "src.a.step"));
    }

    /// Resolver that makes every `target` identifier an alias with several
    /// declarations
    struct ManyDeclarations;

    impl SymbolResolver for ManyDeclarations {
        fn source_file(&self, _path: &str) -> Option<&SourceFile> {
            None
        }

        fn resolve_symbol(
            &self,
            file: &SourceFile,
            node: Node<'_>,
        ) -> Result<Option<ResolvedSymbol>, ResolveError> {
            let text = node.utf8_text(file.content().as_bytes()).unwrap_or("");
            if text != "target" {
                return Ok(None);
            }
            Ok(Some(ResolvedSymbol::Alias {
                name: "target".to_string(),
                file_path: file.path().to_string(),
                binding: ImportBinding {
                    specifier: "./target".to_string(),
                    imported: ImportedName::Named("target".to_string()),
                },
                member: None,
            }))
        }

        fn resolve_alias(
            &self,
            _symbol: &ResolvedSymbol,
        ) -> Result<Option<Vec<Declaration>>, ResolveError> {
            Ok(Some(vec![
                Declaration {
                    fully_qualified_name: Some("\"/ws/src/first\".target".to_string()),
                    file_path: Some("/ws/src/first.ts".to_string()),
                },
                Declaration {
                    fully_qualified_name: Some("\"/ws/src/second\".target".to_string()),
                    file_path: None,
                },
                Declaration {
                    fully_qualified_name: None,
                    file_path: Some("/ws/src/third.ts".to_string()),
                },
            ]))
        }
    }

    #[test]
    fn test_alias_uses_last_named_declaration() {
        let file = SourceFile::parse("/ws/src/main.ts", "function run() { target(); }".to_string())
            .unwrap();
        let symbols = extract_with(&ManyDeclarations, &file);
        let edge = &symbols[0].dependencies[0].edges[0];
        assert_eq!(edge.code_symbol_name, "src.second.target");
        assert_eq!(edge.file_path, "<unknown>");
    }

    #[test]
    fn test_resolver_errors_propagate() {
        let project = project(&[
            ("/ws/main.ts", "import { x } from './a';\nfunction run() { x(); }\n"),
            ("/ws/a.ts", "export { x } from './b';\n"),
            ("/ws/b.ts", "export { x } from './a';\n"),
        ]);
        let file = project.get_source_file("/ws/main.ts").unwrap();
        let result =
            TypeScriptExtractor::new(&project, file, "/ws", file.path(), ExtractionConfig::default())
                .extract_symbols();
        assert!(matches!(result, Err(ResolveError::AliasCycle { .. })));
    }
}
