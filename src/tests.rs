#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    fn jan_5_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
    }

    mod slug_tests {
        use crate::services::slug::normalize;

        #[test]
        fn test_normalize_basic() {
            assert_eq!(normalize("Hello World"), "hello-world");
        }

        #[test]
        fn test_normalize_punctuation() {
            assert_eq!(normalize("My Post!"), "my-post");
            assert_eq!(normalize("Hello, World!"), "hello-world");
        }

        #[test]
        fn test_normalize_unicode() {
            assert_eq!(normalize("Café au lait"), "cafe-au-lait");
        }

        #[test]
        fn test_normalize_collapses_runs() {
            assert_eq!(normalize("a -- b__c"), "a-b-c");
            assert_eq!(normalize("Hello   World"), "hello-world");
        }

        #[test]
        fn test_normalize_strips_edges() {
            assert_eq!(normalize("  --Hello World--  "), "hello-world");
        }

        #[test]
        fn test_normalize_empty_results() {
            assert_eq!(normalize(""), "");
            assert_eq!(normalize("---"), "");
            assert_eq!(normalize("!!!"), "");
            assert_eq!(normalize("   "), "");
        }

        #[test]
        fn test_normalize_idempotent() {
            let samples = [
                "Hello World",
                "My Post!",
                "Café au lait",
                "  --x--y--  ",
                "ALL CAPS 2024",
                "already-a-slug",
                "!!!",
                "",
                "日本語",
            ];
            for s in samples {
                let once = normalize(s);
                assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
            }
        }
    }

    mod slug_format_tests {
        use super::jan_5_2024;
        use crate::services::slug::{SlugFormat, TemplateError};

        #[test]
        fn test_plain_slug() {
            let format = SlugFormat::parse("{slug}").unwrap();
            assert_eq!(format.render(jan_5_2024(), "hello-world").unwrap(), "hello-world");
        }

        #[test]
        fn test_year_month_prefix() {
            let format = SlugFormat::parse("{now:%Y-%m}-{slug}").unwrap();
            assert_eq!(format.render(jan_5_2024(), "my-post").unwrap(), "2024-01-my-post");
        }

        #[test]
        fn test_now_without_spec() {
            let format = SlugFormat::parse("{slug}@{now}").unwrap();
            assert_eq!(
                format.render(jan_5_2024(), "x").unwrap(),
                "x@2024-01-05 00:00:00+00:00"
            );
        }

        #[test]
        fn test_escaped_braces() {
            let format = SlugFormat::parse("{{x}}-{slug}").unwrap();
            assert_eq!(format.render(jan_5_2024(), "hello").unwrap(), "{x}-hello");
        }

        #[test]
        fn test_literal_text_kept() {
            let format = SlugFormat::parse("news/{now:%Y}/{slug}.html").unwrap();
            assert_eq!(
                format.render(jan_5_2024(), "launch").unwrap(),
                "news/2024/launch.html"
            );
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!(
                SlugFormat::parse("{title}"),
                Err(TemplateError::UnknownField("title".to_string()))
            );
            assert_eq!(SlugFormat::parse("{slug"), Err(TemplateError::Unterminated(0)));
            assert_eq!(
                SlugFormat::parse("{slug}}"),
                Err(TemplateError::StrayClosingBrace(6))
            );
            assert_eq!(SlugFormat::parse("{now:%Y}"), Err(TemplateError::MissingSlug));
            assert_eq!(SlugFormat::parse("{slug:>10}"), Err(TemplateError::SlugSpec));
        }

        #[test]
        fn test_invalid_date_format() {
            assert!(matches!(
                SlugFormat::parse("{now:%Y-%}-{slug}"),
                Err(TemplateError::InvalidDateFormat(_))
            ));
        }

        #[test]
        fn test_display_round_trips_source() {
            let format = SlugFormat::parse("{now:%Y-%m}-{slug}").unwrap();
            assert_eq!(format.to_string(), "{now:%Y-%m}-{slug}");
            assert_eq!(format.as_str(), "{now:%Y-%m}-{slug}");
        }
    }

    mod forms_tests {
        use super::jan_5_2024;
        use crate::forms::{parse_datetime, ChoiceField, FormErrors, ValidationError, Widget};
        use chrono::{TimeZone, Utc};

        #[test]
        fn test_parse_datetime_empty_is_unset() {
            assert_eq!(parse_datetime(""), Ok(None));
            assert_eq!(parse_datetime("   "), Ok(None));
        }

        #[test]
        fn test_parse_datetime_formats() {
            assert_eq!(parse_datetime("2024-01-05"), Ok(Some(jan_5_2024())));
            assert_eq!(parse_datetime("2024-01-05 00:00"), Ok(Some(jan_5_2024())));
            assert_eq!(parse_datetime("2024-01-05T00:00:00"), Ok(Some(jan_5_2024())));
            assert_eq!(
                parse_datetime("2024-01-05T02:00:00+02:00"),
                Ok(Some(jan_5_2024()))
            );
            assert_eq!(
                parse_datetime("2024-01-05 13:45:10"),
                Ok(Some(Utc.with_ymd_and_hms(2024, 1, 5, 13, 45, 10).unwrap()))
            );
        }

        #[test]
        fn test_parse_datetime_invalid() {
            assert_eq!(parse_datetime("yesterday"), Err(ValidationError::InvalidDate));
            assert_eq!(parse_datetime("2024-13-01"), Err(ValidationError::InvalidDate));
        }

        #[test]
        fn test_single_choice_is_hidden_and_preselected() {
            let field = ChoiceField::new(vec![(7_i64, "Blog".to_string())], None);
            assert_eq!(field.widget, Widget::Hidden);
            assert_eq!(field.initial, Some(7));
        }

        #[test]
        fn test_multiple_choices_use_select() {
            let field = ChoiceField::new(
                vec![(1_i64, "Blog".to_string()), (2, "News".to_string())],
                Some(2),
            );
            assert_eq!(field.widget, Widget::Select);
            assert_eq!(field.initial, Some(2));
        }

        #[test]
        fn test_form_errors_channels() {
            let mut errors = FormErrors::default();
            assert!(errors.is_empty());

            errors.add("slug", ValidationError::DuplicateSlug);
            errors.add_non_field("Something is off");

            assert!(errors.has("slug", &ValidationError::DuplicateSlug));
            assert!(errors.get("title").is_empty());
            assert_eq!(errors.non_field_errors().to_vec(), vec!["Something is off".to_string()]);
            assert_eq!(
                errors.to_string(),
                "__all__: Something is off; slug: Another article with this slug already exists"
            );
        }
    }

    mod model_tests {
        use super::jan_5_2024;
        use crate::models::{Article, Languages, Language};
        use chrono::Duration;

        fn article() -> Article {
            Article {
                id: 1,
                tree_id: None,
                template: "cms_articles/default.html".to_string(),
                login_required: false,
                creation_date: jan_5_2024(),
                changed_date: jan_5_2024(),
                publication_date: None,
                publication_end_date: None,
            }
        }

        #[test]
        fn test_unpublished_without_date() {
            assert!(!article().is_published_at(jan_5_2024()));
        }

        #[test]
        fn test_publication_window() {
            let mut a = article();
            a.publication_date = Some(jan_5_2024());
            a.publication_end_date = Some(jan_5_2024() + Duration::days(1));

            assert!(!a.is_published_at(jan_5_2024() - Duration::seconds(1)));
            assert!(a.is_published_at(jan_5_2024()));
            assert!(!a.is_published_at(jan_5_2024() + Duration::days(1)));
        }

        #[test]
        fn test_languages_membership() {
            let languages = Languages::new(vec![
                Language::new("en", "English"),
                Language::new("de", "German"),
            ]);
            assert!(languages.contains("de"));
            assert!(!languages.contains("fr"));
            assert_eq!(languages.first().map(|l| l.code.as_str()), Some("en"));
            assert_eq!(languages.iter().count(), 2);
        }
    }

    mod config_tests {
        use crate::Config;
        use std::path::Path;

        fn write_config(name: &str, content: &str) -> std::path::PathBuf {
            use std::io::Write;
            let path = std::env::temp_dir().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(content.as_bytes()).unwrap();
            path
        }

        #[test]
        fn test_config_load_missing_file() {
            let result = Config::load(Path::new("/nonexistent/path.toml"));
            assert!(result.is_err());
        }

        #[test]
        fn test_config_load_valid_toml() {
            let config_path = write_config(
                "test_cms_articles_config.toml",
                r#"
[site]
id = 3
name = "Test Site"

[database]
path = "data/cms-articles.db"

[articles]
slug_format = "{now:%Y}/{slug}"

[[articles.languages]]
code = "en"
label = "English"

[[articles.languages]]
code = "fr"
label = "Français"
"#,
            );

            let config = Config::load(&config_path).unwrap();
            assert_eq!(config.site.id, 3);
            assert_eq!(config.database.pool_size, 10);

            let settings = config.settings().unwrap();
            assert_eq!(settings.site_id, 3);
            assert_eq!(settings.slug_format.as_str(), "{now:%Y}/{slug}");
            assert!(settings.languages.contains("fr"));
            assert_eq!(settings.default_template(), Some("cms_articles/default.html"));

            std::fs::remove_file(&config_path).ok();
        }

        #[test]
        fn test_config_defaults_without_articles_section() {
            let config_path = write_config(
                "test_cms_articles_defaults.toml",
                "[site]\n\n[database]\npath = \"x.db\"\n",
            );

            let config = Config::load(&config_path).unwrap();
            assert_eq!(config.site.id, 1);
            assert_eq!(config.articles.slug_format, "{now:%Y-%m}-{slug}");
            assert_eq!(config.articles.languages.len(), 1);

            std::fs::remove_file(&config_path).ok();
        }

        #[test]
        fn test_config_rejects_bad_slug_format() {
            let config_path = write_config(
                "test_cms_articles_bad_format.toml",
                "[site]\n\n[database]\npath = \"x.db\"\n\n[articles]\nslug_format = \"{title}\"\n",
            );

            let err = Config::load(&config_path).unwrap_err();
            assert!(err.to_string().contains("slug_format"));

            std::fs::remove_file(&config_path).ok();
        }

        #[test]
        fn test_config_rejects_duplicate_language() {
            let config_path = write_config(
                "test_cms_articles_dup_lang.toml",
                r#"
[site]

[database]
path = "x.db"

[[articles.languages]]
code = "en"
label = "English"

[[articles.languages]]
code = "en"
label = "English again"
"#,
            );

            assert!(Config::load(&config_path).is_err());

            std::fs::remove_file(&config_path).ok();
        }
    }

    mod init_tests {
        use crate::cli::init;
        use crate::Config;

        #[test]
        fn test_init_escapes_site_name() {
            let dir = std::env::temp_dir().join(format!("cms_articles_init_{}", std::process::id()));
            std::fs::remove_dir_all(&dir).ok();

            let name = r#"Bob's "Quoted" \ Site"#;
            init::run(dir.clone(), 4, Some(name.to_string())).unwrap();

            let config = Config::load(&dir.join("cms-articles.toml")).unwrap();
            assert_eq!(config.site.id, 4);
            assert_eq!(config.site.name, name);
            assert_eq!(config.articles.slug_format, "{now:%Y-%m}-{slug}");
            assert!(init::run(dir.clone(), 4, None).is_err());

            std::fs::remove_dir_all(&dir).ok();
        }
    }

    mod migration_tests {
        use crate::db::apply_migrations;
        use rusqlite::Connection;

        #[test]
        fn test_failed_migration_leaves_no_trace() {
            let conn = Connection::open_in_memory().unwrap();
            let migrations = [
                (1, "CREATE TABLE step_one (x INTEGER);"),
                (2, "CREATE TABLE step_two (x INTEGER); INSERT INTO missing VALUES (1);"),
            ];

            assert!(apply_migrations(&conn, &migrations).is_err());

            let tables: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('step_one', 'step_two')",
                    [],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(tables, 1);
            let versions: Vec<i32> = conn
                .prepare("SELECT version FROM schema_migrations ORDER BY version")
                .unwrap()
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            assert_eq!(versions, vec![1]);
        }
    }
}
