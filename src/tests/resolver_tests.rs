// End-to-end resolver tests with stubbed host capabilities.

#[cfg(test)]
mod resolver_pipeline_tests {
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use std::collections::HashMap;

    use crate::host::{DefinitionProvider, Document, DocumentOpener, Location, Position};
    use crate::resolver::{self, PreviewReference};

    /// Every lookup lands in the same declaration file.
    struct StaticDefinitions {
        uri: String,
    }

    #[async_trait]
    impl DefinitionProvider for StaticDefinitions {
        async fn resolve_definition(
            &self,
            _document: &Document,
            _position: Position,
        ) -> Result<Vec<Location>> {
            Ok(vec![Location {
                uri: self.uri.clone(),
                position: Position { line: 0, column: 0 },
            }])
        }
    }

    struct NoDefinitions;

    #[async_trait]
    impl DefinitionProvider for NoDefinitions {
        async fn resolve_definition(
            &self,
            _document: &Document,
            _position: Position,
        ) -> Result<Vec<Location>> {
            Ok(Vec::new())
        }
    }

    struct MapOpener {
        files: HashMap<String, String>,
    }

    #[async_trait]
    impl DocumentOpener for MapOpener {
        async fn open_document(&self, uri: &str) -> Result<String> {
            match self.files.get(uri) {
                Some(text) => Ok(text.clone()),
                None => bail!("unreadable document: {uri}"),
            }
        }
    }

    const BADGE_DECLARATION: &str = "\
/**
 * @name Badge
 * @preview data:image/png;base64,iVBORw0KGgo=
 */
export const Badge = () => null;
";

    fn opener_with_badge() -> MapOpener {
        let mut files = HashMap::new();
        files.insert("badge.tsx".to_string(), BADGE_DECLARATION.to_string());
        MapOpener { files }
    }

    #[tokio::test]
    async fn resolves_marker_per_usage() {
        let document = Document::new(
            "app.tsx",
            "import { Badge } from './badge';\n<Badge/>\n<Badge size={2}/>\n",
        );
        let definitions = StaticDefinitions {
            uri: "badge.tsx".to_string(),
        };

        let markers = resolver::resolve(&document, &definitions, &opener_with_badge()).await;

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].symbol, "Badge");
        assert_eq!(markers[0].line, 1);
        assert_eq!(markers[0].column, 6);
        assert_eq!(markers[1].line, 2);
        assert_eq!(
            markers[0].reference,
            PreviewReference::Embedded("data:image/png;base64,iVBORw0KGgo=".to_string())
        );
    }

    #[tokio::test]
    async fn definition_miss_yields_no_marker() {
        let document = Document::new("app.tsx", "import { Badge } from './badge';\n<Badge/>\n");
        let markers = resolver::resolve(&document, &NoDefinitions, &opener_with_badge()).await;
        assert!(markers.is_empty());
    }

    #[tokio::test]
    async fn unreadable_declaration_yields_no_marker() {
        let document = Document::new("app.tsx", "import { Badge } from './badge';\n<Badge/>\n");
        let definitions = StaticDefinitions {
            uri: "elsewhere.tsx".to_string(),
        };
        let markers = resolver::resolve(&document, &definitions, &opener_with_badge()).await;
        assert!(markers.is_empty());
    }

    #[tokio::test]
    async fn declaration_without_preview_tag_yields_no_marker() {
        let mut files = HashMap::new();
        files.insert(
            "badge.tsx".to_string(),
            "export const Badge = () => null;".to_string(),
        );
        let document = Document::new("app.tsx", "import { Badge } from './badge';\n<Badge/>\n");
        let definitions = StaticDefinitions {
            uri: "badge.tsx".to_string(),
        };

        let markers = resolver::resolve(&document, &definitions, &MapOpener { files }).await;
        assert!(markers.is_empty());
    }

    // The same symbol imported twice produces duplicate candidates; position
    // dedup keeps one marker per usage site.
    #[tokio::test]
    async fn duplicate_candidates_produce_one_marker_per_position() {
        let document = Document::new(
            "app.tsx",
            "import { Badge } from './a';\nimport { Badge } from './b';\n<Badge/>\n",
        );
        let definitions = StaticDefinitions {
            uri: "badge.tsx".to_string(),
        };

        let markers = resolver::resolve(&document, &definitions, &opener_with_badge()).await;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line, 2);
    }
}
