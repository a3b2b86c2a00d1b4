use crate::models::{CreatePost, Post, UpdatePost};
use crate::services::error::{PostError, PostResult};
use crate::services::slug::{generate_slug, resolve_unique_slug};
use crate::Database;
use rusqlite::{Connection, OptionalExtension};

const MAX_TITLE_CHARS: usize = 200;

pub fn create_post(db: &Database, input: CreatePost) -> PostResult<Post> {
    let title = input.title.trim().to_string();
    validate_fields(&title, &input.content)?;

    let base = generate_slug(&title);
    if base.is_empty() {
        return Err(PostError::Validation(
            "title must contain at least one letter or digit".to_string(),
        ));
    }

    let conn = db.get().map_err(PostError::Storage)?;
    let now = chrono::Utc::now().to_rfc3339();

    let slug = resolve_unique_slug(&base, |candidate| slug_exists(&conn, candidate, None))?;
    match insert_post(&conn, &slug, &title, &input.content, &now) {
        Ok(id) => Ok(assemble(id, &slug, &title, &input.content, &now, &now)),
        Err(err) if is_unique_violation(&err) => {
            // Lost a race against a concurrent create; the winner's slug is
            // now visible, so one more resolution pass lands on a free one.
            let slug = resolve_unique_slug(&base, |candidate| slug_exists(&conn, candidate, None))?;
            match insert_post(&conn, &slug, &title, &input.content, &now) {
                Ok(id) => Ok(assemble(id, &slug, &title, &input.content, &now, &now)),
                Err(err) if is_unique_violation(&err) => Err(PostError::Conflict),
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

pub fn update_post(db: &Database, slug: &str, input: UpdatePost) -> PostResult<Post> {
    let title = input.title.trim().to_string();
    validate_fields(&title, &input.content)?;

    let conn = db.get().map_err(PostError::Storage)?;
    let existing = find_by_slug(&conn, slug)?.ok_or(PostError::NotFound)?;

    // Re-derive the slug only when the title actually changed, and keep
    // the current slug when the fresh base still matches it. Content-only
    // edits never move a permalink.
    let new_slug = if title != existing.title {
        let base = generate_slug(&title);
        if base.is_empty() {
            return Err(PostError::Validation(
                "title must contain at least one letter or digit".to_string(),
            ));
        }
        if base != existing.slug {
            resolve_unique_slug(&base, |candidate| {
                slug_exists(&conn, candidate, Some(existing.id))
            })?
        } else {
            existing.slug.clone()
        }
    } else {
        existing.slug.clone()
    };

    let now = chrono::Utc::now().to_rfc3339();
    match write_update(&conn, slug, &new_slug, &title, &input.content, &now) {
        Ok(0) => Err(PostError::NotFound),
        Ok(_) => Ok(assemble(
            existing.id,
            &new_slug,
            &title,
            &input.content,
            &existing.created_at,
            &now,
        )),
        Err(err) if is_unique_violation(&err) => {
            let base = generate_slug(&title);
            let new_slug = resolve_unique_slug(&base, |candidate| {
                slug_exists(&conn, candidate, Some(existing.id))
            })?;
            match write_update(&conn, slug, &new_slug, &title, &input.content, &now) {
                Ok(0) => Err(PostError::NotFound),
                Ok(_) => Ok(assemble(
                    existing.id,
                    &new_slug,
                    &title,
                    &input.content,
                    &existing.created_at,
                    &now,
                )),
                Err(err) if is_unique_violation(&err) => Err(PostError::Conflict),
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

pub fn delete_post(db: &Database, slug: &str) -> PostResult<()> {
    let conn = db.get().map_err(PostError::Storage)?;
    let deleted = conn.execute("DELETE FROM posts WHERE slug = ?1", [slug])?;
    if deleted == 0 {
        return Err(PostError::NotFound);
    }
    Ok(())
}

pub fn get_post_by_slug(db: &Database, slug: &str) -> PostResult<Option<Post>> {
    let conn = db.get().map_err(PostError::Storage)?;
    find_by_slug(&conn, slug)
}

pub fn list_posts(db: &Database) -> PostResult<Vec<Post>> {
    let conn = db.get().map_err(PostError::Storage)?;
    let mut stmt = conn.prepare(
        "SELECT id, title, content, slug, created_at, updated_at
         FROM posts ORDER BY created_at DESC, id DESC",
    )?;
    let posts = stmt
        .query_map([], row_to_post)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(posts)
}

fn validate_fields(title: &str, content: &str) -> PostResult<()> {
    if title.is_empty() {
        return Err(PostError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(PostError::Validation(
            "title cannot be more than 200 characters".to_string(),
        ));
    }
    if content.trim().is_empty() {
        return Err(PostError::Validation("content is required".to_string()));
    }
    Ok(())
}

fn find_by_slug(conn: &Connection, slug: &str) -> PostResult<Option<Post>> {
    let post = conn
        .query_row(
            "SELECT id, title, content, slug, created_at, updated_at FROM posts WHERE slug = ?1",
            [slug],
            row_to_post,
        )
        .optional()?;
    Ok(post)
}

fn slug_exists(conn: &Connection, candidate: &str, exclude_id: Option<i64>) -> PostResult<bool> {
    let exists = match exclude_id {
        Some(id) => conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = ?1 AND id != ?2)",
            rusqlite::params![candidate, id],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = ?1)",
            [candidate],
            |row| row.get(0),
        )?,
    };
    Ok(exists)
}

fn insert_post(
    conn: &Connection,
    slug: &str,
    title: &str,
    content: &str,
    now: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO posts (slug, title, content, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![slug, title, content, now, now],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Single-statement find-and-replace keyed by the original slug; a zero
/// row count means the post vanished between lookup and write.
fn write_update(
    conn: &Connection,
    original_slug: &str,
    new_slug: &str,
    title: &str,
    content: &str,
    now: &str,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE posts SET slug = ?1, title = ?2, content = ?3, updated_at = ?4 WHERE slug = ?5",
        rusqlite::params![new_slug, title, content, now, original_slug],
    )
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn assemble(
    id: i64,
    slug: &str,
    title: &str,
    content: &str,
    created_at: &str,
    updated_at: &str,
) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        slug: slug.to_string(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        slug: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
