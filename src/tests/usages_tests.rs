#[cfg(test)]
mod usage_scan_tests {
    use crate::resolver::{scan_imports, scan_usages};

    #[test]
    fn finds_tag_openings_in_all_forms() {
        let source = "<Badge/>\n<Badge >\n<Badge size={2}/>";
        let usages = scan_usages(source, "Badge");
        assert_eq!(usages.len(), 3);
        assert_eq!(usages[0].line, 0);
        assert_eq!(usages[1].line, 1);
        assert_eq!(usages[2].line, 2);
    }

    #[test]
    fn position_points_just_past_the_angle_bracket() {
        let usages = scan_usages("const x = <Badge/>;", "Badge");
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].name_start, 11);
        assert_eq!(usages[0].name_end, 16);
    }

    #[test]
    fn longer_names_do_not_match_prefixes() {
        // <BadgeGroup must not count as a usage of Badge
        let usages = scan_usages("<BadgeGroup/> <Badge/>", "Badge");
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].name_start, 15);
    }

    #[test]
    fn plain_identifier_mentions_are_not_usages() {
        assert!(scan_usages("const b = Badge;", "Badge").is_empty());
    }

    // Regression check for the alias-resolution inconsistency: the import
    // scan yields the exported name `Bar`, while the document only ever uses
    // the local alias `<Baz/>`, so no tag-form usage is found for any
    // candidate of that import entry.
    #[test]
    fn aliased_component_usage_is_invisible_to_candidates() {
        let source = "import { Foo, Bar as Baz } from 'x';\n<Foo/> <Baz/>";
        let candidates = scan_imports(source);
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Foo", "Bar"]);

        assert_eq!(scan_usages(source, "Foo").len(), 1);
        assert!(scan_usages(source, "Bar").is_empty());
    }
}
