//! Tool Router - builds the rmcp ToolRouter from the registry.

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::ToolRegistry;

/// Build the tool router with one route per registered tool.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .entries()
        .iter()
        .fold(ToolRouter::new(), |router, entry| {
            let entry = entry.clone();
            let client = registry.client().clone();
            router.with_route(ToolRoute::new_dyn(
                entry.tool.clone(),
                move |ctx: ToolCallContext<'_, S>| {
                    let args = ctx.arguments.clone().unwrap_or_default();
                    let call = entry.call(client.clone(), args);
                    async move { call.await }.boxed()
                },
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FtrackClient;
    use crate::client::tests::test_config;
    use std::sync::Arc;

    struct TestServer {}

    fn registry() -> ToolRegistry {
        let client = FtrackClient::new(test_config("http://127.0.0.1:9"));
        ToolRegistry::new(Arc::new(client))
    }

    #[test]
    fn test_registry_matches_router() {
        let registry = registry();
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(&registry);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_router_has_query_tool() {
        let router: ToolRouter<TestServer> = build_tool_router(&registry());
        let tools = router.list_all();
        let query = tools.iter().find(|t| t.name == "query").unwrap();
        assert!(query.input_schema.contains_key("properties"));
    }
}
