use serde::ser::{Serialize, SerializeMap, Serializer};

use super::route::HttpMethod;

/// A hypermedia affordance: where to go and which verb to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub method: HttpMethod,
}

/// Ordered links keyed by relation name.
///
/// Insertion order is kept; inserting a rel that is already present replaces its
/// target in place, so rels stay unique. Serializes as a JSON object:
/// `{"self": {"href": "/courses/1", "method": "GET"}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<Link>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, link: Link) {
        match self.links.iter_mut().find(|existing| existing.rel == link.rel) {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    pub fn first(&self) -> Option<&Link> {
        self.links.first()
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.rel.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(serde::Serialize)]
struct Target<'a> {
    href: &'a str,
    method: HttpMethod,
}

impl Serialize for LinkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.links.len()))?;
        for link in &self.links {
            map.serialize_entry(
                &link.rel,
                &Target {
                    href: &link.href,
                    method: link.method,
                },
            )?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(rel: &str, href: &str) -> Link {
        Link {
            rel: rel.into(),
            href: href.into(),
            method: HttpMethod::Get,
        }
    }

    #[test]
    fn reinserting_a_rel_replaces_in_place() {
        let mut links = LinkSet::new();
        links.insert(link("self", "/a"));
        links.insert(link("next", "/b"));
        links.insert(link("self", "/c"));

        assert_eq!(links.rels().collect::<Vec<_>>(), ["self", "next"]);
        assert_eq!(links.get("self").unwrap().href, "/c");
    }

    #[test]
    fn serializes_as_object_keyed_by_rel() {
        let mut links = LinkSet::new();
        links.insert(link("self", "/courses/1"));
        links.insert(Link {
            rel: "delete".into(),
            href: "/courses/1".into(),
            method: HttpMethod::Delete,
        });

        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(
            json,
            r#"{"self":{"href":"/courses/1","method":"GET"},"delete":{"href":"/courses/1","method":"DELETE"}}"#
        );
    }
}
