// Import scan tests, including the alias-resolution regression checks.

#[cfg(test)]
mod import_scan_tests {
    use crate::resolver::scan_imports;

    fn names(source: &str) -> Vec<String> {
        scan_imports(source).into_iter().map(|s| s.name).collect()
    }

    #[test]
    fn default_import_is_a_candidate() {
        assert_eq!(names("import Badge from './badge';"), vec!["Badge"]);
    }

    #[test]
    fn named_imports_are_candidates() {
        assert_eq!(
            names("import { Badge, Chip } from '@ui/kit';"),
            vec!["Badge", "Chip"]
        );
    }

    #[test]
    fn default_and_named_combined() {
        assert_eq!(
            names("import Layout, { Panel } from './layout';"),
            vec!["Layout", "Panel"]
        );
    }

    #[test]
    fn lowercase_names_are_not_component_candidates() {
        assert_eq!(
            names("import { useState, Badge } from 'react';"),
            vec!["Badge"]
        );
    }

    #[test]
    fn named_list_spanning_multiple_lines() {
        let source = "import {\n  Badge,\n  Chip,\n} from '@ui/kit';";
        assert_eq!(names(source), vec!["Badge", "Chip"]);
    }

    #[test]
    fn module_path_is_recorded() {
        let symbols = scan_imports("import { Badge } from '@ui/kit';");
        assert_eq!(symbols[0].module, "@ui/kit");
    }

    // `X as Y` resolves to the exported name X, not the local binding Y.
    #[test]
    fn alias_resolves_to_exported_name() {
        assert_eq!(
            names("import { Foo, Bar as Baz } from 'x';"),
            vec!["Foo", "Bar"]
        );
    }

    // The intended convention would surface the local binding `Baz`; keep a
    // pinned check that it is NOT produced today so a deliberate fix has to
    // touch this test.
    #[test]
    fn alias_local_binding_is_not_a_candidate() {
        let found = names("import { Bar as Baz } from 'x';");
        assert!(!found.contains(&"Baz".to_string()));
        assert_eq!(found, vec!["Bar"]);
    }

    #[test]
    fn side_effect_imports_yield_nothing() {
        assert!(names("import './styles.css';").is_empty());
    }
}
