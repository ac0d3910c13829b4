//! Route descriptors: declarative, transport-independent descriptions of the
//! operations a client may invoke.
//!
//! A [`RouteTable`] is built once at startup and handed to the
//! [`LinkDeriver`](super::LinkDeriver). Nothing here knows how a request is
//! dispatched; a descriptor only says which verb and path shape an operation has,
//! and which resource fields the path needs.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Relation names used by the course route table.
pub mod rel {
    pub const SELF: &str = "self";
    pub const BY_CATEGORY: &str = "by-category";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const DELETE_ALL: &str = "delete-all";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a descriptor's link is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// On each individual resource.
    Item,
    /// On the collection payload itself.
    Collection,
    /// On both.
    Both,
}

impl Scope {
    pub fn covers_item(self) -> bool {
        matches!(self, Scope::Item | Scope::Both)
    }

    pub fn covers_collection(self) -> bool {
        matches!(self, Scope::Collection | Scope::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(String),
}

/// A path such as `/courses/{id}`, parsed once into literal and token segments.
///
/// An unmatched `{` is kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            let Some(len) = rest[open..].find('}') else {
                break;
            };
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            segments.push(Segment::Token(rest[open + 1..open + len].to_string()));
            rest = &rest[open + len + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Token names in the order they appear.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes every token, escaping each value as one path segment.
    ///
    /// Dot segments are percent-encoded so clients do not collapse them. Returns
    /// `None` if any token has no value or an empty one.
    pub fn render(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let mut href = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => href.push_str(text),
                Segment::Token(name) => {
                    let value = lookup(name).filter(|value| !value.is_empty())?;
                    let encoded = urlencoding::encode(&value);
                    match &*encoded {
                        "." => href.push_str("%2E"),
                        ".." => href.push_str("%2E%2E"),
                        other => href.push_str(other),
                    }
                }
            }
        }
        Some(href)
    }
}

/// One addressable operation: relation name, verb, path shape and the resource
/// fields the link needs before it may be advertised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    rel: Cow<'static, str>,
    method: HttpMethod,
    template: PathTemplate,
    scope: Scope,
    is_self: bool,
    required: Vec<String>,
}

impl RouteDescriptor {
    /// An item-scoped descriptor whose required fields are the template's tokens.
    pub fn new(rel: impl Into<Cow<'static, str>>, method: HttpMethod, template: &str) -> Self {
        let template = PathTemplate::parse(template);
        let required = template.tokens().map(str::to_string).collect();
        Self {
            rel: rel.into(),
            method,
            template,
            scope: Scope::Item,
            is_self: false,
            required,
        }
    }

    /// Marks this descriptor as the self link, which is always emitted first.
    pub fn self_link(mut self) -> Self {
        self.is_self = true;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Adds a required field that does not appear in the path.
    pub fn require(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.required.contains(&field) {
            self.required.push(field);
        }
        self
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_self(&self) -> bool {
        self.is_self
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }
}

/// The ordered route table for one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The standard course table mounted under `base_path` (e.g. `/courses`).
    pub fn course_routes(base_path: &str) -> Self {
        let base = base_path.trim_end_matches('/');
        let item = format!("{base}/{{id}}");
        let collection = format!("{base}/");

        Self::new(vec![
            RouteDescriptor::new(rel::SELF, HttpMethod::Get, &item).self_link(),
            RouteDescriptor::new(
                rel::BY_CATEGORY,
                HttpMethod::Get,
                &format!("{base}/category/{{category}}"),
            ),
            RouteDescriptor::new(rel::CREATE, HttpMethod::Post, &collection)
                .with_scope(Scope::Both),
            RouteDescriptor::new(rel::UPDATE, HttpMethod::Put, &item),
            RouteDescriptor::new(rel::DELETE, HttpMethod::Delete, &item),
            RouteDescriptor::new(rel::DELETE_ALL, HttpMethod::Delete, &collection)
                .with_scope(Scope::Both),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn get(&self, rel: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.rel() == rel)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "id" => Some("7".into()),
            "category" => Some("Web Dev/2".into()),
            "empty" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn template_lists_tokens_in_order() {
        let template = PathTemplate::parse("/a/{category}/b/{id}");
        assert_eq!(template.tokens().collect::<Vec<_>>(), ["category", "id"]);
    }

    #[test]
    fn template_escapes_token_values_as_one_segment() {
        let template = PathTemplate::parse("/courses/category/{category}");
        assert_eq!(
            template.render(lookup).as_deref(),
            Some("/courses/category/Web%20Dev%2F2")
        );
    }

    #[test]
    fn dot_segment_values_stay_inside_their_segment() {
        let template = PathTemplate::parse("/courses/category/{category}");
        let render = |value: &'static str| template.render(move |_: &str| Some(value.into()));

        assert_eq!(render("..").as_deref(), Some("/courses/category/%2E%2E"));
        assert_eq!(render(".").as_deref(), Some("/courses/category/%2E"));
        assert_eq!(render("v1.2").as_deref(), Some("/courses/category/v1.2"));
    }

    #[test]
    fn template_without_value_does_not_render() {
        assert_eq!(PathTemplate::parse("/x/{missing}").render(lookup), None);
        assert_eq!(PathTemplate::parse("/x/{empty}").render(lookup), None);
    }

    #[test]
    fn unmatched_brace_is_literal() {
        let template = PathTemplate::parse("/x/{id}/{oops");
        assert_eq!(template.tokens().collect::<Vec<_>>(), ["id"]);
        assert_eq!(template.render(lookup).as_deref(), Some("/x/7/{oops"));
    }

    #[test]
    fn required_fields_default_to_template_tokens() {
        let route = RouteDescriptor::new("x", HttpMethod::Get, "/x/{id}")
            .require("category")
            .require("id");
        assert_eq!(route.required_fields().collect::<Vec<_>>(), ["id", "category"]);
    }

    #[test]
    fn course_routes_follow_relation_order() {
        let table = RouteTable::course_routes("/courses/");
        let rels: Vec<_> = table.iter().map(RouteDescriptor::rel).collect();

        assert_eq!(
            rels,
            [rel::SELF, rel::BY_CATEGORY, rel::CREATE, rel::UPDATE, rel::DELETE, rel::DELETE_ALL]
        );
        assert!(table.get(rel::SELF).unwrap().is_self());
        assert_eq!(table.get(rel::UPDATE).unwrap().template().as_str(), "/courses/{id}");
        assert_eq!(table.get(rel::DELETE_ALL).unwrap().scope(), Scope::Both);
    }
}
