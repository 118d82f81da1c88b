//! Query handlers for the Forum context.
//!
//! Queries never mutate aggregates and never dispatch events.

use quorum_core::error::DomainError;
use quorum_core::outcome::{Failure, Outcome};
use quorum_core::pagination::PaginationParams;
use uuid::Uuid;

use crate::application::repositories::{
    AnswerCommentsRepository, AnswersRepository, QuestionCommentsRepository, QuestionsRepository,
};
use crate::domain::read_models::{
    AnswerWithAuthor, CommentWithAuthor, QuestionDetails, QuestionSummary,
};

/// Retrieves a question by slug, joined with its author and attachments.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_question_by_slug(
    slug: &str,
    questions: &dyn QuestionsRepository,
) -> Result<Outcome<QuestionDetails>, DomainError> {
    match questions.find_details_by_slug(slug).await? {
        Some(details) => Ok(Outcome::Success(details)),
        None => Ok(Failure::not_found(format!("question {slug} not found")).into()),
    }
}

/// Lists questions, most recently created first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn fetch_recent_questions(
    params: PaginationParams,
    questions: &dyn QuestionsRepository,
) -> Result<Outcome<Vec<QuestionSummary>>, DomainError> {
    let page = questions.find_many_recent(params).await?;
    Ok(Outcome::Success(
        page.iter().map(QuestionSummary::from).collect(),
    ))
}

/// Lists the answers to a question with their authors, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn fetch_question_answers(
    question_id: Uuid,
    params: PaginationParams,
    answers: &dyn AnswersRepository,
) -> Result<Outcome<Vec<AnswerWithAuthor>>, DomainError> {
    let page = answers.find_many_with_author(question_id, params).await?;
    Ok(Outcome::Success(page))
}

/// Lists the comments on a question with their authors, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn fetch_question_comments(
    question_id: Uuid,
    params: PaginationParams,
    comments: &dyn QuestionCommentsRepository,
) -> Result<Outcome<Vec<CommentWithAuthor>>, DomainError> {
    let page = comments.find_many_with_author(question_id, params).await?;
    Ok(Outcome::Success(page))
}

/// Lists the comments on an answer with their authors, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn fetch_answer_comments(
    answer_id: Uuid,
    params: PaginationParams,
    comments: &dyn AnswerCommentsRepository,
) -> Result<Outcome<Vec<CommentWithAuthor>>, DomainError> {
    let page = comments.find_many_with_author(answer_id, params).await?;
    Ok(Outcome::Success(page))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use quorum_core::dispatcher::EventDispatcher;
    use quorum_core::outcome::FailureKind;
    use quorum_test_support::FixedClock;

    use super::*;
    use crate::application::repositories::{AttachmentsRepository, StudentsRepository};
    use crate::domain::aggregates::{Answer, Question};
    use crate::domain::entities::{AnswerComment, Attachment, QuestionComment, Student};
    use crate::infrastructure::in_memory::InMemoryForum;

    fn forum() -> InMemoryForum {
        InMemoryForum::new(Arc::new(EventDispatcher::new()))
    }

    async fn register_student(forum: &InMemoryForum, name: &str) -> Student {
        let student = Student::new(name, format!("{}@example.com", name.to_lowercase()));
        forum.students.create(&student).await.unwrap();
        student
    }

    #[tokio::test]
    async fn test_get_question_by_slug_returns_details_with_author_and_attachments() {
        // Arrange
        let forum = forum();
        let author = register_student(&forum, "Ada").await;
        let attachment = Attachment::new("diagram", "https://files.example.com/diagram.png");
        forum.attachments.create(&attachment).await.unwrap();
        let mut question = Question::new(
            author.id,
            "Why is the sky blue?",
            "Asking for a friend.",
            &FixedClock::default_instant(),
        );
        question.attach(attachment.id);
        forum.questions.create(&mut question).await.unwrap();

        // Act
        let outcome = get_question_by_slug("why-is-the-sky-blue", &*forum.questions)
            .await
            .unwrap();

        // Assert
        let details = outcome.into_result().unwrap();
        assert_eq!(details.question_id, question.id);
        assert_eq!(details.author_name, "Ada");
        assert_eq!(details.attachments, vec![attachment]);
    }

    #[tokio::test]
    async fn test_get_question_by_slug_returns_not_found_for_unknown_slug() {
        // Arrange
        let forum = forum();

        // Act
        let outcome = get_question_by_slug("missing", &*forum.questions)
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_recent_questions_returns_newest_first_in_pages() {
        // Arrange
        let forum = forum();
        let start = FixedClock::default_instant().0;
        for day in 0..22 {
            let clock = FixedClock(start + Duration::days(day));
            let mut question = Question::new(Uuid::new_v4(), format!("Question {day}"), "Body", &clock);
            forum.questions.create(&mut question).await.unwrap();
        }

        // Act
        let first = fetch_recent_questions(PaginationParams::new(1), &*forum.questions)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        let second = fetch_recent_questions(PaginationParams::new(2), &*forum.questions)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        // Assert
        assert_eq!(first.len(), 20);
        assert_eq!(first[0].title, "Question 21");
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].title, "Question 0");
    }

    #[tokio::test]
    async fn test_fetch_question_answers_joins_author_name() {
        // Arrange
        let forum = forum();
        let clock = FixedClock::default_instant();
        let answerer = register_student(&forum, "Grace").await;
        let mut question = Question::new(Uuid::new_v4(), "Title", "Body", &clock);
        forum.questions.create(&mut question).await.unwrap();
        let mut answer = Answer::new(answerer.id, question.id, "Try this", &clock);
        forum.answers.create(&mut answer).await.unwrap();
        let mut other = Answer::new(answerer.id, Uuid::new_v4(), "Elsewhere", &clock);
        forum.answers.create(&mut other).await.unwrap();

        // Act
        let page = fetch_question_answers(question.id, PaginationParams::default(), &*forum.answers)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        // Assert
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].answer_id, answer.id);
        assert_eq!(page[0].author_name, "Grace");
    }

    #[tokio::test]
    async fn test_fetch_question_answers_returns_newest_first() {
        // Arrange
        let forum = forum();
        let earlier = FixedClock::default_instant();
        let later = FixedClock(earlier.0 + Duration::hours(1));
        let mut question = Question::new(Uuid::new_v4(), "Title", "Body", &earlier);
        forum.questions.create(&mut question).await.unwrap();
        let mut first = Answer::new(Uuid::new_v4(), question.id, "First", &earlier);
        forum.answers.create(&mut first).await.unwrap();
        let mut second = Answer::new(Uuid::new_v4(), question.id, "Second", &later);
        forum.answers.create(&mut second).await.unwrap();

        // Act
        let page = fetch_question_answers(question.id, PaginationParams::default(), &*forum.answers)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        // Assert
        let ids: Vec<Uuid> = page.iter().map(|answer| answer.answer_id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_fetch_answer_comments_returns_newest_first() {
        // Arrange
        let forum = forum();
        let answer_id = Uuid::new_v4();
        let earlier = FixedClock::default_instant().0;
        let older = AnswerComment::new(Uuid::new_v4(), answer_id, "older", earlier);
        let newer = AnswerComment::new(
            Uuid::new_v4(),
            answer_id,
            "newer",
            earlier + Duration::minutes(5),
        );
        forum.answer_comments.create(&older).await.unwrap();
        forum.answer_comments.create(&newer).await.unwrap();

        // Act
        let page = fetch_answer_comments(answer_id, PaginationParams::default(), &*forum.answer_comments)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        // Assert
        let contents: Vec<&str> = page.iter().map(|comment| comment.content.as_str()).collect();
        assert_eq!(contents, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_fetch_question_comments_paginates_newest_first() {
        // Arrange
        let forum = forum();
        let commenter = register_student(&forum, "Linus").await;
        let question_id = Uuid::new_v4();
        let start = FixedClock::default_instant().0;
        for minute in 0..22 {
            let comment = QuestionComment::new(
                commenter.id,
                question_id,
                format!("comment {minute}"),
                start + Duration::minutes(minute),
            );
            forum.question_comments.create(&comment).await.unwrap();
        }

        // Act
        let page = fetch_question_comments(
            question_id,
            PaginationParams::new(2),
            &*forum.question_comments,
        )
        .await
        .unwrap()
        .into_result()
        .unwrap();

        // Assert
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].content, "comment 1");
        assert_eq!(page[1].content, "comment 0");
        assert_eq!(page[0].author_name, "Linus");
    }

    #[tokio::test]
    async fn test_fetch_answer_comments_only_returns_comments_for_answer() {
        // Arrange
        let forum = forum();
        let commenter = register_student(&forum, "Barbara").await;
        let answer_id = Uuid::new_v4();
        let now = FixedClock::default_instant().0;
        let mine = AnswerComment::new(commenter.id, answer_id, "mine", now);
        let theirs = AnswerComment::new(commenter.id, Uuid::new_v4(), "theirs", now);
        forum.answer_comments.create(&mine).await.unwrap();
        forum.answer_comments.create(&theirs).await.unwrap();

        // Act
        let page = fetch_answer_comments(answer_id, PaginationParams::default(), &*forum.answer_comments)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        // Assert
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].comment_id, mine.id);
    }
}
