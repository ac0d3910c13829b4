//! Derivation of hypermedia links from a resource and a route table.
//!
//! The deriver is a pure function of its inputs: the same resource state and the
//! same [`RouteTable`] always give the same ordered [`LinkSet`]. A descriptor whose
//! required fields are not available on the resource is skipped, so a course
//! without a category never advertises a category search.

use tracing::trace;

use super::link_set::{Link, LinkSet};
use super::route::{RouteDescriptor, RouteTable, Scope};

/// Exposes the field values route templates may reference.
pub trait Linkable {
    /// The value for `name`, or `None` if the resource does not have it.
    ///
    /// Empty strings are treated the same as `None`.
    fn link_token(&self, name: &str) -> Option<String>;
}

/// Computes link sets from a [`RouteTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkDeriver;

impl LinkDeriver {
    /// Links for one resource. The self descriptor comes first, all others follow
    /// in table order.
    pub fn derive<R: Linkable + ?Sized>(resource: &R, routes: &RouteTable) -> LinkSet {
        derive_scoped(routes, Scope::covers_item, &|name| resource.link_token(name))
    }

    /// Per-item links for every resource of a collection, in input order.
    pub fn derive_collection<'r, R: Linkable>(
        resources: &'r [R],
        routes: &RouteTable,
    ) -> Vec<(&'r R, LinkSet)> {
        resources
            .iter()
            .map(|resource| (resource, Self::derive(resource, routes)))
            .collect()
    }

    /// Links for the collection payload itself.
    ///
    /// No resource is in scope, so only descriptors without required fields apply.
    pub fn collection_links(routes: &RouteTable) -> LinkSet {
        derive_scoped(routes, Scope::covers_collection, &|_| None)
    }
}

fn derive_scoped(
    routes: &RouteTable,
    in_scope: fn(Scope) -> bool,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> LinkSet {
    let applicable = |route: &&RouteDescriptor| in_scope(route.scope());
    let self_routes = routes.iter().filter(applicable).filter(|r| r.is_self());
    let other_routes = routes.iter().filter(applicable).filter(|r| !r.is_self());

    let mut links = LinkSet::new();
    for route in self_routes.chain(other_routes) {
        let missing = route
            .required_fields()
            .find(|field| lookup(*field).map_or(true, |value| value.is_empty()));
        if let Some(field) = missing {
            trace!(rel = route.rel(), field, "Skipping link");
            continue;
        }

        if let Some(href) = route.template().render(lookup) {
            links.insert(Link {
                rel: route.rel().to_string(),
                href,
                method: route.method(),
            });
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::route::{rel, HttpMethod, RouteDescriptor};
    use std::collections::HashMap;

    struct Fields(HashMap<&'static str, &'static str>);

    impl Linkable for Fields {
        fn link_token(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|value| value.to_string())
        }
    }

    fn fields(pairs: &[(&'static str, &'static str)]) -> Fields {
        Fields(pairs.iter().copied().collect())
    }

    #[test]
    fn self_link_is_first_even_when_listed_last() {
        let routes = RouteTable::new(vec![
            RouteDescriptor::new("edit", HttpMethod::Put, "/n/{id}"),
            RouteDescriptor::new("self", HttpMethod::Get, "/n/{id}").self_link(),
        ]);

        let links = LinkDeriver::derive(&fields(&[("id", "3")]), &routes);
        assert_eq!(links.rels().collect::<Vec<_>>(), ["self", "edit"]);
    }

    #[test]
    fn full_course_gets_every_item_link_in_order() {
        let routes = RouteTable::course_routes("/courses");
        let links = LinkDeriver::derive(&fields(&[("id", "1"), ("category", "Spring")]), &routes);

        assert_eq!(
            links.rels().collect::<Vec<_>>(),
            [rel::SELF, rel::BY_CATEGORY, rel::CREATE, rel::UPDATE, rel::DELETE, rel::DELETE_ALL]
        );
        assert_eq!(links.get(rel::BY_CATEGORY).unwrap().href, "/courses/category/Spring");
        assert_eq!(links.get(rel::DELETE).unwrap().method, HttpMethod::Delete);
    }

    #[test]
    fn empty_category_omits_category_search() {
        let routes = RouteTable::course_routes("/courses");
        let links = LinkDeriver::derive(&fields(&[("id", "1"), ("category", "")]), &routes);

        assert!(!links.contains(rel::BY_CATEGORY));
        assert_eq!(links.first().unwrap().rel, rel::SELF);
    }

    #[test]
    fn unsaved_resource_only_gets_id_free_links() {
        let routes = RouteTable::course_routes("/courses");
        let links = LinkDeriver::derive(&fields(&[("category", "Spring")]), &routes);

        assert_eq!(
            links.rels().collect::<Vec<_>>(),
            [rel::BY_CATEGORY, rel::CREATE, rel::DELETE_ALL]
        );
    }

    #[test]
    fn explicit_requirement_gates_link() {
        let routes = RouteTable::new(vec![
            RouteDescriptor::new("publish", HttpMethod::Post, "/n/publish").require("owner"),
        ]);

        assert!(LinkDeriver::derive(&fields(&[]), &routes).is_empty());
        assert!(LinkDeriver::derive(&fields(&[("owner", "me")]), &routes).contains("publish"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let routes = RouteTable::course_routes("/courses");
        let resource = fields(&[("id", "9"), ("category", "Data Science")]);

        assert_eq!(
            LinkDeriver::derive(&resource, &routes),
            LinkDeriver::derive(&resource, &routes)
        );
    }

    #[test]
    fn collection_gets_create_and_delete_all() {
        let routes = RouteTable::course_routes("/courses");
        let links = LinkDeriver::collection_links(&routes);

        assert_eq!(links.rels().collect::<Vec<_>>(), [rel::CREATE, rel::DELETE_ALL]);
        assert_eq!(links.get(rel::CREATE).unwrap().href, "/courses/");
    }

    #[test]
    fn collection_items_are_derived_independently() {
        let routes = RouteTable::course_routes("/courses");
        let items = [fields(&[("id", "1"), ("category", "A")]), fields(&[("id", "2")])];

        let derived = LinkDeriver::derive_collection(&items, &routes);
        assert_eq!(derived.len(), 2);
        assert!(derived[0].1.contains(rel::BY_CATEGORY));
        assert!(!derived[1].1.contains(rel::BY_CATEGORY));
        assert_eq!(derived[1].1.get(rel::SELF).unwrap().href, "/courses/2");
    }
}
