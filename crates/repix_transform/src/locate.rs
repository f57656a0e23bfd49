use async_trait::async_trait;
use repix_core::{repix_atom, Attribute, ImageTagConfig, Node, RepixAtom};

lazy_static! {
    static ref WILDCARD: RepixAtom = repix_atom!("*");
}

/// One image-reference attribute discovered by the walk.
#[derive(Debug)]
pub struct ImageMatch<'a> {
    pub tag_name: &'a RepixAtom,
    pub attribute: &'a Attribute,
}

/// Receives matches in document order. Each invocation is fully awaited
/// before the traversal continues.
#[async_trait]
pub trait ImageVisitor {
    async fn visit_image(&mut self, image: ImageMatch<'_>);
}

/// Walks the template roots in pre-order with an explicit work list,
/// handing every eligible image reference to the visitor.
pub async fn walk_images(
    roots: &[Node],
    tags: &ImageTagConfig,
    include_absolute: bool,
    visitor: &mut (impl ImageVisitor + Send),
) {
    let mut work_list: Vec<&Node> = roots.iter().rev().collect();

    while let Some(node) = work_list.pop() {
        let Node::Element(element) = node else {
            continue;
        };

        let empty = vec![];
        let attrs = tags.get(&element.starting_tag.tag_name).unwrap_or(&empty);
        let wild_card_attrs = tags.get(&*WILDCARD).unwrap_or(&empty);

        if !(attrs.is_empty() && wild_card_attrs.is_empty()) {
            for attr in element.starting_tag.attributes.iter() {
                let Some(value) = attr.value.as_ref() else {
                    continue;
                };

                if (!attrs.contains(&attr.name) && !wild_card_attrs.contains(&attr.name))
                    || value.trim().is_empty()
                    || is_external_url(value)
                    || is_data_url(value)
                    || value.starts_with('#')
                    || (!include_absolute && !is_relative_url(value))
                {
                    continue;
                }

                visitor
                    .visit_image(ImageMatch {
                        tag_name: &element.starting_tag.tag_name,
                        attribute: attr,
                    })
                    .await;
            }
        }

        for child in element.children.iter().rev() {
            work_list.push(child);
        }
    }
}

pub(crate) fn strip_prefix(url: &str) -> &str {
    let mut url = url;
    if let Some(stripped_one) = url.strip_prefix('~') {
        if let Some(stripped_two) = stripped_one.strip_prefix('/') {
            url = stripped_two;
        } else {
            url = stripped_one;
        }
    }
    url
}

fn is_relative_url(url: &str) -> bool {
    let first_char = url.chars().nth(0);
    matches!(first_char, Some('.' | '~' | '@'))
}

fn is_external_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

fn is_data_url(url: &str) -> bool {
    url.trim_start().starts_with("data:")
}
