use std::process;

use notes_index::store::{self, DefaultSource, HttpSource, PostStore};
use notes_index::taxonomy::{self, TagRef};
use notes_index::{boot, related, render, search, seo, Config};

const USAGE: &str = "usage: notes-index <command>

commands:
  search <query>         search results fragment
  tags                   tags index fragment
  tag <slug>             tag page fragment
  tag --label <label>    tag page fragment for a display label
  related <url> [max]    related notes fragment for the post at <url>
  meta <slug>            tag page head tags";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        process::exit(2);
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let cmd = args.first().ok_or_else(|| USAGE.to_string())?;

    let cfg = Config::load_default()?;
    boot::run(&cfg);

    let index = PostStore::new(
        Box::new(DefaultSource::new(HttpSource::new(cfg.fetch_timeout_secs))),
        store::load_fallback(cfg.fallback_index.as_deref()),
    );
    let posts = index.load(Some(cfg.posts_index.as_str()));

    let out = match (cmd.as_str(), &args[1..]) {
        ("search", rest) if !rest.is_empty() => {
            let query = rest.join(" ");
            let results = search::search(&posts, &query, cfg.search_max_results);
            render::search_results(&query, &results)
        }
        ("tags", []) => render::tag_index(&taxonomy::aggregate(&posts), &cfg),
        ("tag", [flag, label]) if flag == "--label" => {
            let page = taxonomy::resolve(&posts, &TagRef::Label(label.clone()));
            render::tag_page(&page, &cfg)
        }
        ("tag", [slug]) => {
            let page = taxonomy::resolve(&posts, &TagRef::Slug(slug.clone()));
            render::tag_page(&page, &cfg)
        }
        ("tag", []) => render::missing_tag(&cfg),
        ("related", [url, rest @ ..]) if rest.len() <= 1 => {
            let max = match rest.first() {
                Some(raw) => related::clamp_max(Some(raw.as_str())),
                None => cfg.related_limit(),
            };
            related::related_for_url(&posts, url, max)
                .and_then(|r| render::related_section(&r))
                .unwrap_or_default()
        }
        ("meta", [slug]) => {
            let page = taxonomy::resolve(&posts, &TagRef::Slug(slug.clone()));
            seo::TagPageMeta::for_label(&page.label, &cfg)
                .map(|m| m.to_html())
                .unwrap_or_default()
        }
        _ => return Err(USAGE.to_string()),
    };

    println!("{}", out);
    Ok(())
}
