//! Planning of `<a href>` and `<img src>` rewrites.
//!
//! Planning only reads the tree; the returned edits are applied by the caller.

use std::path::Path;

use crate::config::ImagesConfig;
use crate::index::HtmlIndex;
use crate::report::{Ambiguity, Rewrite};
use crate::resolve::{Resolution, resolve_target};
use crate::utils::xml::common::get_attr;
use crate::utils::xml::link::{LinkKind, classify_link, split_suffix, to_href};
use crate::utils::xml::{Document, TreeEdit};

/// What the link pass needs to know about the document being fixed.
pub struct LinkContext<'a> {
    pub index: &'a HtmlIndex,
    pub root: &'a Path,
    /// Absolute directory containing the document.
    pub doc_dir: &'a Path,
    pub images: &'a ImagesConfig,
}

#[derive(Debug, Default)]
pub struct LinkPlan {
    pub edits: Vec<TreeEdit>,
    pub links: Vec<Rewrite>,
    pub images: Vec<Rewrite>,
    pub unresolved: Vec<String>,
    pub ambiguous: Vec<Ambiguity>,
}

pub fn plan_links(doc: &Document, ctx: &LinkContext<'_>) -> LinkPlan {
    let mut plan = LinkPlan::default();

    doc.walk(|path, elem| {
        if elem.is("a") {
            if let Some(href) = get_attr(&elem.start, "href")
                && let Some(new_href) = plan_href(&href, ctx, &mut plan)
            {
                plan.edits.push(TreeEdit::SetAttr {
                    path: path.clone(),
                    key: "href".into(),
                    value: new_href.clone(),
                });
                plan.links.push(Rewrite {
                    from: href.into_owned(),
                    to: new_href,
                });
            }
        } else if elem.is("img")
            && let Some(src) = get_attr(&elem.start, "src")
            && let Some(new_src) = plan_src(&src, ctx.images)
        {
            plan.edits.push(TreeEdit::SetAttr {
                path: path.clone(),
                key: "src".into(),
                value: new_src.clone(),
            });
            plan.images.push(Rewrite {
                from: src.into_owned(),
                to: new_src,
            });
        }
        true
    });

    plan
}

/// New href for a link, or `None` when it stays as it is.
fn plan_href(href: &str, ctx: &LinkContext<'_>, plan: &mut LinkPlan) -> Option<String> {
    match classify_link(href) {
        LinkKind::Empty | LinkKind::Fragment | LinkKind::External => return None,
        LinkKind::Bare | LinkKind::Path => {}
    }

    let (target, suffix) = split_suffix(href);
    if target.is_empty() {
        return None;
    }

    let resolution = resolve_target(target, ctx.index, ctx.root);
    let resolved = match &resolution {
        Resolution::NotFound => {
            plan.unresolved.push(href.to_owned());
            return None;
        }
        Resolution::Ambiguous { chosen, candidates } => {
            plan.ambiguous.push(Ambiguity {
                href: href.to_owned(),
                chosen: chosen.clone(),
                candidates: candidates.clone(),
            });
            chosen
        }
        Resolution::Exact(path) | Resolution::Unique(path) => path,
    };

    let relative = pathdiff::diff_paths(ctx.root.join(resolved), ctx.doc_dir)?;
    let new_href = format!("{}{suffix}", to_href(&relative));
    (new_href != href).then_some(new_href)
}

/// New src for a bare image file name, or `None` when it stays as it is.
fn plan_src(src: &str, images: &ImagesConfig) -> Option<String> {
    if classify_link(src) != LinkKind::Bare {
        return None;
    }
    let stem = Path::new(src).file_stem()?.to_string_lossy();
    let new_src = images.asset_src(&stem);
    (new_src != src).then_some(new_src)
}
