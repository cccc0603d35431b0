//! Query language guide resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Reference for the expressions accepted by the `query` tool (static Markdown).
pub struct QueryGuideResource;

impl ResourceDefinition for QueryGuideResource {
    const URI: &'static str = "ftrack://docs/query-language";
    const NAME: &'static str = "ftrack Query Language";
    const DESCRIPTION: &'static str = "How to write expressions for the query tool";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(GUIDE.to_string())
    }
}

const GUIDE: &str = r#"# ftrack query language

Expressions select entities of one type and the attributes to return:

```
select name, status.name from Task where project.name is "my_project" limit 10
```

## Projection

`select <attr>, <attr>, ... from <EntityType>`. Attributes may follow
relations with dots (`parent.name`, `status.name`). `from Task` alone returns
the default projection.

## Filters

- Comparison: `is`, `is_not`, `>`, `<`, `>=`, `<=`, `like`, `not_like`,
  `in`, `not_in`
- Combine with `and`, `or`, `not` and parentheses
- Collections: `assignments any (resource_id is "<user id>")`,
  `children has (name is "layout")`
- Strings are double-quoted; escape `"` and `\` with a backslash

## Ordering and paging

`order by <attr> [ascending|descending]`, `offset <n>`, `limit <n>`.

## Useful tools

- `query_schemas` lists every entity type and its attributes
- `parse_query` checks an expression without running it
- `list_statuses`, `list_types`, `list_priorities` return ids for filters
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_guide_is_markdown() {
        assert_eq!(QueryGuideResource::MIME_TYPE, "text/markdown");
        match QueryGuideResource::content() {
            ResourceContent::Text(text) => assert!(text.starts_with("# ftrack query language")),
            other => panic!("unexpected content {other:?}"),
        }
    }
}
