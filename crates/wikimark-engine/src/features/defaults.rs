use super::{Interlinker, ResolveError, TargetResolver, TranscludeUrlBuilder};
use crate::context::RenderContext;
use crate::links::encode_title;
use crate::model::{Container, Document, DocumentId};

/// Serves each namespace from its own subdomain:
/// `{scheme}://{target}.{host}[:{port}]/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInterlinker {
    pub scheme: String,
    pub host: String,
    pub port: Option<String>,
}

impl HostInterlinker {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port: None,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    fn port_suffix(&self) -> String {
        match (self.scheme.as_str(), self.port.as_deref()) {
            (_, None) | ("http", Some("80")) | ("https", Some("443")) => String::new(),
            (_, Some(port)) => format!(":{port}"),
        }
    }
}

impl Interlinker for HostInterlinker {
    fn base_uri(&self, _ctx: &RenderContext<'_>, target: &str) -> String {
        format!(
            "{}://{target}.{}{}/",
            self.scheme,
            self.host,
            self.port_suffix()
        )
    }
}

/// Resolves `@target` through the recipe `{target}{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTargetResolver {
    pub suffix: String,
}

impl RecipeTargetResolver {
    pub const DEFAULT_SUFFIX: &'static str = "_public";

    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn recipe_for(&self, target: &str) -> String {
        format!("{target}{}", self.suffix)
    }
}

impl Default for RecipeTargetResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUFFIX)
    }
}

impl TargetResolver for RecipeTargetResolver {
    fn resolve(
        &self,
        ctx: &RenderContext<'_>,
        target: &str,
        id: DocumentId,
    ) -> Result<DocumentId, ResolveError> {
        let store = ctx.store.ok_or(ResolveError::NoStore)?;
        let bag = store.bag_for_title(&ctx.principal, &self.recipe_for(target), &id.title)?;
        Ok(DocumentId {
            container: Some(Container::Bag(bag)),
            ..id
        })
    }
}

/// Points at `{prefix}/bags/{bag}/tiddlers/{title}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagUrlBuilder {
    pub prefix: String,
}

impl BagUrlBuilder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim_end_matches('/').to_string(),
        }
    }
}

impl TranscludeUrlBuilder for BagUrlBuilder {
    fn source_uri(&self, _ctx: &RenderContext<'_>, document: &Document) -> String {
        let title = encode_title(&document.title);
        match &document.container {
            Some(Container::Bag(bag)) => {
                format!("{}/bags/{}/tiddlers/{title}", self.prefix, encode_title(bag))
            }
            Some(Container::Recipe(recipe)) => format!(
                "{}/recipes/{}/tiddlers/{title}",
                self.prefix,
                encode_title(recipe)
            ),
            None => format!("{}/tiddlers/{title}", self.prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Principal;
    use crate::store::{MemoryStore, Policy, StoreError};
    use rstest::rstest;

    #[rstest]
    #[case("http", Some("8080"), "http://cdent.tiddlyspace.org:8080/")]
    #[case("http", Some("80"), "http://cdent.tiddlyspace.org/")]
    #[case("https", Some("443"), "https://cdent.tiddlyspace.org/")]
    #[case("https", None, "https://cdent.tiddlyspace.org/")]
    fn host_interlinker_ports(
        #[case] scheme: &str,
        #[case] port: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut interlinker = HostInterlinker::new(scheme, "tiddlyspace.org");
        interlinker.port = port.map(str::to_string);
        let ctx = RenderContext::new(Principal::guest());
        assert_eq!(interlinker.base_uri(&ctx, "cdent"), expected);
    }

    #[test]
    fn recipe_resolver_binds_bag() {
        let mut store = MemoryStore::new();
        store.put("cdent_public", Document::new("Notes", "hi"));
        store.put_recipe("cdent_public", ["cdent_public"], Policy::default());
        let ctx = RenderContext::new(Principal::guest()).with_store(&store);

        let id = RecipeTargetResolver::default()
            .resolve(&ctx, "cdent", DocumentId::new("Notes"))
            .unwrap();
        assert_eq!(id, DocumentId::in_bag("Notes", "cdent_public"));
    }

    #[test]
    fn recipe_resolver_reports_missing_recipe() {
        let store = MemoryStore::new();
        let ctx = RenderContext::new(Principal::guest()).with_store(&store);
        let result =
            RecipeTargetResolver::default().resolve(&ctx, "nobody", DocumentId::new("Notes"));
        assert!(matches!(
            result,
            Err(ResolveError::Store(StoreError::RecipeNotFound(_)))
        ));
    }

    #[test]
    fn recipe_resolver_needs_store() {
        let ctx = RenderContext::new(Principal::guest());
        let result = RecipeTargetResolver::default().resolve(&ctx, "x1", DocumentId::new("N"));
        assert!(matches!(result, Err(ResolveError::NoStore)));
    }

    #[test]
    fn bag_url_encodes_parts() {
        let ctx = RenderContext::new(Principal::guest());
        let doc = Document::new("tiddler a", "").with_bag("my bag");
        assert_eq!(
            BagUrlBuilder::new("http://host/").source_uri(&ctx, &doc),
            "http://host/bags/my%20bag/tiddlers/tiddler%20a"
        );
    }
}
