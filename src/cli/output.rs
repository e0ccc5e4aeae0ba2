//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use reviewfeed::FeedError;
use reviewfeed::feed::ReviewPage;
use reviewfeed::feed::models::MAX_RATING;
use reviewfeed::site::{
    ContactChannel, FaqEntry, ProcessStep, SERVICE_INCLUSIONS, ServiceOffer,
};

/// Writes one page of reviews followed by a page summary line.
pub fn write_review_page<W: Write>(writer: &mut W, page: &ReviewPage<'_>) -> Result<(), FeedError> {
    if page.items.is_empty() {
        writeln!(writer, "No reviews yet.").map_err(|e| io_error(&e))?;
    }

    for review in page.items {
        let date = review.date.as_deref().unwrap_or("undated");
        writeln!(
            writer,
            "  {} {} ({date})",
            stars(review.rating),
            review.author
        )
        .map_err(|e| io_error(&e))?;
        writeln!(writer, "    {}", review.text).map_err(|e| io_error(&e))?;
    }

    let page_info = &page.page_info;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Page {} of {} ({} reviews shown, {} per page)",
        page_info.current_page(),
        page_info.total_pages(),
        page.items.len(),
        page_info.per_page()
    )
    .map_err(|e| io_error(&e))?;

    if page_info.has_next() {
        writeln!(writer, "More pages available.").map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Writes the portfolio categories, service catalogue and process steps.
pub fn write_catalogue<W: Write>(
    writer: &mut W,
    categories: &[&str],
    services: &[ServiceOffer],
    steps: &[ProcessStep],
) -> Result<(), FeedError> {
    writeln!(writer, "포트폴리오 카테고리: {}", categories.join(" · "))
        .map_err(|e| io_error(&e))?;

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "서비스 & 기본 가격").map_err(|e| io_error(&e))?;
    for offer in services {
        writeln!(
            writer,
            "  {} - {} ({})",
            offer.name, offer.description, offer.starting_price
        )
        .map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "  포함: {}", SERVICE_INCLUSIONS.join(", ")).map_err(|e| io_error(&e))?;

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "작업 진행 프로세스").map_err(|e| io_error(&e))?;
    for (position, step) in (1_usize..).zip(steps) {
        writeln!(writer, "  {position}. {} - {}", step.title, step.description)
            .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes each question followed by its indented answer.
pub fn write_faq<W: Write>(writer: &mut W, entries: &[FaqEntry]) -> Result<(), FeedError> {
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "자주 묻는 질문").map_err(|e| io_error(&e))?;
    for entry in entries {
        writeln!(writer, "  Q. {}", entry.question).map_err(|e| io_error(&e))?;
        writeln!(writer, "     {}", entry.answer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes the contact channels, one per line.
pub fn write_channels<W: Write>(
    writer: &mut W,
    channels: &[ContactChannel],
) -> Result<(), FeedError> {
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "의뢰/문의").map_err(|e| io_error(&e))?;
    for channel in channels {
        writeln!(writer, "  {}: {}", channel.kind.label(), channel.link)
            .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    let empty = usize::from(MAX_RATING.saturating_sub(rating));
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Converts an I/O error to a [`FeedError::Io`].
pub(crate) fn io_error(error: &io::Error) -> FeedError {
    FeedError::io(error)
}
