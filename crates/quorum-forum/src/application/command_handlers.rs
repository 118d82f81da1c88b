//! Command handlers for the Forum context.
//!
//! Each handler validates the command, loads the aggregate, checks that the
//! actor owns it, applies the change, and stores it. Rule violations come
//! back as `Outcome::Failure`; only store and dispatch faults are `Err`.

use quorum_core::clock::Clock;
use quorum_core::error::DomainError;
use quorum_core::outcome::{Failure, Outcome};
use tracing::info;
use uuid::Uuid;

use crate::application::repositories::{
    AnswerCommentsRepository, AnswersRepository, AttachmentsRepository,
    QuestionCommentsRepository, QuestionsRepository, StudentsRepository,
};
use crate::domain::aggregates::{Answer, Question};
use crate::domain::commands::{
    AnswerQuestion, ChooseQuestionBestAnswer, CommentOnAnswer, CommentOnQuestion,
    CreateAttachment, CreateQuestion, DeleteAnswer, DeleteAnswerComment, DeleteQuestion,
    DeleteQuestionComment, EditAnswer, EditQuestion, RegisterStudent,
};
use crate::domain::entities::{AnswerComment, Attachment, QuestionComment, Student};

/// Rejects blank text fields.
fn require_text(field: &str, value: &str) -> Result<(), Failure> {
    if value.trim().is_empty() {
        return Err(Failure::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Rejects a question whose title yields no slug, or whose slug another
/// question already uses.
async fn check_slug(
    question: &Question,
    questions: &dyn QuestionsRepository,
) -> Result<Option<Failure>, DomainError> {
    let slug = question.slug();
    if slug.as_str().is_empty() {
        return Ok(Some(Failure::validation(
            "title must contain at least one letter or digit",
        )));
    }
    match questions.find_by_slug(slug.as_str()).await? {
        Some(existing) if existing.id != question.id => Ok(Some(Failure::validation(format!(
            "slug {slug} is already used by another question"
        )))),
        _ => Ok(None),
    }
}

fn question_not_found(question_id: Uuid) -> Failure {
    Failure::not_found(format!("question {question_id} not found"))
}

fn answer_not_found(answer_id: Uuid) -> Failure {
    Failure::not_found(format!("answer {answer_id} not found"))
}

fn comment_not_found(comment_id: Uuid) -> Failure {
    Failure::not_found(format!("comment {comment_id} not found"))
}

/// Handles `CreateQuestion`: builds the question with its attachment links
/// and stores it.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_create_question(
    command: &CreateQuestion,
    clock: &dyn Clock,
    questions: &dyn QuestionsRepository,
) -> Result<Outcome<Question>, DomainError> {
    if let Err(failure) = require_text("title", &command.title)
        .and_then(|()| require_text("content", &command.content))
    {
        return Ok(failure.into());
    }

    let mut question = Question::new(
        command.author_id,
        command.title.trim(),
        &command.content,
        clock,
    );
    if let Some(failure) = check_slug(&question, questions).await? {
        return Ok(failure.into());
    }
    for &attachment_id in &command.attachment_ids {
        question.attach(attachment_id);
    }

    questions.create(&mut question).await?;

    info!(question_id = %question.id, slug = %question.slug(), "question created");
    Ok(Outcome::Success(question))
}

/// Handles `EditQuestion`: replaces title, content, and the attachment set.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_edit_question(
    command: &EditQuestion,
    clock: &dyn Clock,
    questions: &dyn QuestionsRepository,
) -> Result<Outcome<Question>, DomainError> {
    if let Err(failure) = require_text("title", &command.title)
        .and_then(|()| require_text("content", &command.content))
    {
        return Ok(failure.into());
    }

    let Some(mut question) = questions.find_by_id(command.question_id).await? else {
        return Ok(question_not_found(command.question_id).into());
    };
    if question.author_id() != command.author_id {
        return Ok(Failure::not_allowed("only the author can edit this question").into());
    }

    question.edit(command.title.trim(), &command.content, clock);
    if let Some(failure) = check_slug(&question, questions).await? {
        return Ok(failure.into());
    }
    question.replace_attachments(&command.attachment_ids, clock);

    questions.save(&mut question).await?;

    info!(question_id = %question.id, "question edited");
    Ok(Outcome::Success(question))
}

/// Handles `DeleteQuestion`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_delete_question(
    command: &DeleteQuestion,
    questions: &dyn QuestionsRepository,
) -> Result<Outcome<()>, DomainError> {
    let Some(question) = questions.find_by_id(command.question_id).await? else {
        return Ok(question_not_found(command.question_id).into());
    };
    if question.author_id() != command.author_id {
        return Ok(Failure::not_allowed("only the author can delete this question").into());
    }

    questions.delete(&question).await?;

    info!(question_id = %question.id, "question deleted");
    Ok(Outcome::Success(()))
}

/// Handles `AnswerQuestion`: creates the answer, which raises
/// `AnswerCreated` once stored.
///
/// # Errors
///
/// Returns `DomainError` if the store fails or a subscriber of
/// `AnswerCreated` fails. In the latter case the answer is already stored.
pub async fn handle_answer_question(
    command: &AnswerQuestion,
    clock: &dyn Clock,
    questions: &dyn QuestionsRepository,
    answers: &dyn AnswersRepository,
) -> Result<Outcome<Answer>, DomainError> {
    if let Err(failure) = require_text("content", &command.content) {
        return Ok(failure.into());
    }
    if questions.find_by_id(command.question_id).await?.is_none() {
        return Ok(question_not_found(command.question_id).into());
    }

    let mut answer = Answer::new(
        command.author_id,
        command.question_id,
        &command.content,
        clock,
    );
    for &attachment_id in &command.attachment_ids {
        answer.attach(attachment_id);
    }

    answers.create(&mut answer).await?;

    info!(answer_id = %answer.id, question_id = %command.question_id, "question answered");
    Ok(Outcome::Success(answer))
}

/// Handles `EditAnswer`: replaces content and the attachment set.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_edit_answer(
    command: &EditAnswer,
    clock: &dyn Clock,
    answers: &dyn AnswersRepository,
) -> Result<Outcome<Answer>, DomainError> {
    if let Err(failure) = require_text("content", &command.content) {
        return Ok(failure.into());
    }

    let Some(mut answer) = answers.find_by_id(command.answer_id).await? else {
        return Ok(answer_not_found(command.answer_id).into());
    };
    if answer.author_id() != command.author_id {
        return Ok(Failure::not_allowed("only the author can edit this answer").into());
    }

    answer.edit(&command.content, clock);
    answer.replace_attachments(&command.attachment_ids, clock);

    answers.save(&mut answer).await?;

    info!(answer_id = %answer.id, "answer edited");
    Ok(Outcome::Success(answer))
}

/// Handles `DeleteAnswer`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_delete_answer(
    command: &DeleteAnswer,
    answers: &dyn AnswersRepository,
) -> Result<Outcome<()>, DomainError> {
    let Some(answer) = answers.find_by_id(command.answer_id).await? else {
        return Ok(answer_not_found(command.answer_id).into());
    };
    if answer.author_id() != command.author_id {
        return Ok(Failure::not_allowed("only the author can delete this answer").into());
    }

    answers.delete(&answer).await?;

    info!(answer_id = %answer.id, "answer deleted");
    Ok(Outcome::Success(()))
}

/// Handles `ChooseQuestionBestAnswer`: only the question's author may pick
/// the best answer. A changed choice raises `QuestionBestAnswerChosen`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails or a subscriber fails.
pub async fn handle_choose_question_best_answer(
    command: &ChooseQuestionBestAnswer,
    clock: &dyn Clock,
    questions: &dyn QuestionsRepository,
    answers: &dyn AnswersRepository,
) -> Result<Outcome<Question>, DomainError> {
    let Some(answer) = answers.find_by_id(command.answer_id).await? else {
        return Ok(answer_not_found(command.answer_id).into());
    };
    let Some(mut question) = questions.find_by_id(answer.question_id()).await? else {
        return Ok(question_not_found(answer.question_id()).into());
    };
    if question.author_id() != command.author_id {
        return Ok(
            Failure::not_allowed("only the question author can choose the best answer").into(),
        );
    }

    question.choose_best_answer(answer.id, clock);

    questions.save(&mut question).await?;

    info!(question_id = %question.id, answer_id = %answer.id, "best answer chosen");
    Ok(Outcome::Success(question))
}

/// Handles `CommentOnQuestion`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_comment_on_question(
    command: &CommentOnQuestion,
    clock: &dyn Clock,
    questions: &dyn QuestionsRepository,
    comments: &dyn QuestionCommentsRepository,
) -> Result<Outcome<QuestionComment>, DomainError> {
    if let Err(failure) = require_text("content", &command.content) {
        return Ok(failure.into());
    }
    if questions.find_by_id(command.question_id).await?.is_none() {
        return Ok(question_not_found(command.question_id).into());
    }

    let comment = QuestionComment::new(
        command.author_id,
        command.question_id,
        &command.content,
        clock.now(),
    );
    comments.create(&comment).await?;

    info!(comment_id = %comment.id, question_id = %command.question_id, "question commented");
    Ok(Outcome::Success(comment))
}

/// Handles `CommentOnAnswer`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_comment_on_answer(
    command: &CommentOnAnswer,
    clock: &dyn Clock,
    answers: &dyn AnswersRepository,
    comments: &dyn AnswerCommentsRepository,
) -> Result<Outcome<AnswerComment>, DomainError> {
    if let Err(failure) = require_text("content", &command.content) {
        return Ok(failure.into());
    }
    if answers.find_by_id(command.answer_id).await?.is_none() {
        return Ok(answer_not_found(command.answer_id).into());
    }

    let comment = AnswerComment::new(
        command.author_id,
        command.answer_id,
        &command.content,
        clock.now(),
    );
    comments.create(&comment).await?;

    info!(comment_id = %comment.id, answer_id = %command.answer_id, "answer commented");
    Ok(Outcome::Success(comment))
}

/// Handles `DeleteQuestionComment`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_delete_question_comment(
    command: &DeleteQuestionComment,
    comments: &dyn QuestionCommentsRepository,
) -> Result<Outcome<()>, DomainError> {
    let Some(comment) = comments.find_by_id(command.comment_id).await? else {
        return Ok(comment_not_found(command.comment_id).into());
    };
    if comment.author_id != command.author_id {
        return Ok(Failure::not_allowed("only the author can delete this comment").into());
    }

    comments.delete(&comment).await?;

    info!(comment_id = %comment.id, "question comment deleted");
    Ok(Outcome::Success(()))
}

/// Handles `DeleteAnswerComment`.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_delete_answer_comment(
    command: &DeleteAnswerComment,
    comments: &dyn AnswerCommentsRepository,
) -> Result<Outcome<()>, DomainError> {
    let Some(comment) = comments.find_by_id(command.comment_id).await? else {
        return Ok(comment_not_found(command.comment_id).into());
    };
    if comment.author_id != command.author_id {
        return Ok(Failure::not_allowed("only the author can delete this comment").into());
    }

    comments.delete(&comment).await?;

    info!(comment_id = %comment.id, "answer comment deleted");
    Ok(Outcome::Success(()))
}

/// Handles `RegisterStudent`. E-mail addresses are unique, ignoring case.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_register_student(
    command: &RegisterStudent,
    students: &dyn StudentsRepository,
) -> Result<Outcome<Student>, DomainError> {
    if let Err(failure) = require_text("name", &command.name)
        .and_then(|()| require_text("email", &command.email))
    {
        return Ok(failure.into());
    }
    let email = command.email.trim();
    if students.find_by_email(email).await?.is_some() {
        return Ok(Failure::validation(format!("email {email} is already registered")).into());
    }

    let student = Student::new(command.name.trim(), email);
    students.create(&student).await?;

    info!(student_id = %student.id, "student registered");
    Ok(Outcome::Success(student))
}

/// Handles `CreateAttachment`: records metadata for an uploaded file.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn handle_create_attachment(
    command: &CreateAttachment,
    attachments: &dyn AttachmentsRepository,
) -> Result<Outcome<Attachment>, DomainError> {
    if let Err(failure) = require_text("title", &command.title)
        .and_then(|()| require_text("url", &command.url))
    {
        return Ok(failure.into());
    }

    let attachment = Attachment::new(command.title.trim(), command.url.trim());
    attachments.create(&attachment).await?;

    info!(attachment_id = %attachment.id, "attachment recorded");
    Ok(Outcome::Success(attachment))
}
