use super::{ArticleCommand, ArticleFields};
use crate::config::ArticleSettings;
use crate::forms::{ArticleForm, FormErrors, PublicationDatesForm, Widget};
use crate::models::{Article, ArticleInput, PublicationDatesInput, Title, TitleInput};
use crate::services::articles;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub fn run(config_path: &Path, command: ArticleCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let settings = config.settings()?;
    let db = Database::open_with_pool_size(&config.database.path, config.database.pool_size)?;

    match command {
        ArticleCommand::Create { fields } => {
            let input = to_input(&settings, fields, None, None);
            let mut form = ArticleForm::new(&settings, None, input);
            prefill_tree(&db, &mut form)?;
            submit(&db, form)?;
        }
        ArticleCommand::Edit { id, fields } => {
            let existing = articles::get_article(&db, id)?
                .ok_or_else(|| anyhow::anyhow!("Article {} not found", id))?;
            let language = fields
                .language
                .clone()
                .or_else(|| settings.languages.first().map(|l| l.code.clone()));
            let title = language.as_deref().and_then(|l| existing.title(l)).cloned();
            let input = to_input(&settings, fields, Some(&existing.article), title.as_ref());
            let mut form = ArticleForm::new(&settings, Some(&existing.article), input);
            if let Some(stored) = title {
                form = form.with_initial_slug(stored.slug);
            }
            submit(&db, form)?;
        }
        ArticleCommand::Dates {
            id,
            language,
            start,
            end,
        } => {
            let existing = articles::get_article(&db, id)?
                .ok_or_else(|| anyhow::anyhow!("Article {} not found", id))?;
            let keep = |dt: Option<chrono::DateTime<chrono::Utc>>| dt.map(|d| d.to_rfc3339());
            let input = PublicationDatesInput {
                language: language.or_else(|| settings.languages.first().map(|l| l.code.clone())),
                publication_date: start.or_else(|| keep(existing.article.publication_date)),
                publication_end_date: end.or_else(|| keep(existing.article.publication_end_date)),
            };
            let mut form = PublicationDatesForm::new(&settings, input);
            if !form.is_valid() {
                print_errors(form.errors());
                anyhow::bail!("Publication dates were not saved");
            }
            form.save(&db, id)?;
        }
        ArticleCommand::Show { id, json } => {
            let article = articles::get_article(&db, id)?
                .ok_or_else(|| anyhow::anyhow!("Article {} not found", id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&article)?);
            } else {
                let a = &article.article;
                println!("id:               {}", a.id);
                println!(
                    "tree:             {}",
                    a.tree_id.map(|t| t.to_string()).unwrap_or_default()
                );
                println!("template:         {}", a.template);
                println!("login required:   {}", a.login_required);
                println!("created:          {}", a.creation_date.to_rfc3339());
                println!("publication date: {}", fmt_date(a.publication_date));
                println!("publication end:  {}", fmt_date(a.publication_end_date));
                println!("published now:    {}", a.is_published_at(chrono::Utc::now()));
                for title in &article.titles {
                    println!("[{}] {} ({})", title.language, title.title, title.slug);
                }
            }
        }
        ArticleCommand::List { tree } => {
            println!("{:<6} {:<6} {:<6} {:<32} {}", "ID", "TREE", "LANG", "SLUG", "TITLE");
            println!("{}", "-".repeat(80));
            for article in articles::list_articles(&db, tree)? {
                let tree = article
                    .article
                    .tree_id
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                for title in &article.titles {
                    println!(
                        "{:<6} {:<6} {:<6} {:<32} {}",
                        article.article.id, tree, title.language, title.slug, title.title
                    );
                }
            }
        }
        ArticleCommand::Delete { id } => {
            if !articles::delete_article(&db, id)? {
                tracing::warn!("Article {} not found", id);
            }
        }
    }

    Ok(())
}

fn to_input(
    settings: &ArticleSettings,
    fields: ArticleFields,
    existing: Option<&Article>,
    title: Option<&Title>,
) -> ArticleInput {
    let keep = |new: Option<String>, old: Option<&Option<String>>| {
        new.or_else(|| old.cloned().flatten())
    };
    let title_text = fields
        .title
        .or_else(|| title.map(|t| t.title.clone()))
        .unwrap_or_default();
    // A new title derives its slug from the title; an edit keeps the stored one.
    let slug = match title {
        Some(_) => fields.slug,
        None => fields.slug.or_else(|| Some(title_text.clone())),
    };

    ArticleInput {
        language: fields
            .language
            .or_else(|| settings.languages.first().map(|l| l.code.clone())),
        tree: fields.tree.or_else(|| existing.and_then(|a| a.tree_id)),
        template: fields.template.or_else(|| existing.map(|a| a.template.clone())),
        login_required: fields
            .login_required
            .or_else(|| existing.map(|a| a.login_required))
            .unwrap_or(false),
        title: TitleInput {
            title: title_text,
            slug,
            description: keep(fields.description, title.map(|t| &t.description)),
            page_title: keep(fields.page_title, title.map(|t| &t.page_title)),
            menu_title: keep(fields.menu_title, title.map(|t| &t.menu_title)),
            meta_description: keep(fields.meta_description, title.map(|t| &t.meta_description)),
            image: keep(fields.image, title.map(|t| &t.image)),
        },
    }
}

/// A hidden single-choice tree field submits its initial value.
fn prefill_tree(db: &Database, form: &mut ArticleForm<'_>) -> Result<()> {
    if form.data().tree.is_some() {
        return Ok(());
    }
    let conn = db.get()?;
    let field = form.tree_field(&conn)?;
    if field.widget == Widget::Hidden {
        form.data_mut().tree = field.initial;
    }
    Ok(())
}

fn submit(db: &Database, mut form: ArticleForm<'_>) -> Result<()> {
    if !form.is_valid(db)? {
        print_errors(form.errors());
        anyhow::bail!("Article was not saved");
    }
    let id = form.save(db)?;
    println!("{}", id);
    Ok(())
}

fn print_errors(errors: &FormErrors) {
    for message in errors.non_field_errors() {
        eprintln!("error: {}", message);
    }
    for (field, messages) in errors.fields() {
        for message in messages {
            eprintln!("{}: {}", field, message);
        }
    }
}

fn fmt_date(dt: Option<chrono::DateTime<chrono::Utc>>) -> String {
    dt.map(|d| d.to_rfc3339()).unwrap_or_else(|| "-".to_string())
}
