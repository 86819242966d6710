//! Interactive quiz screen on the terminal.

use std::sync::Arc;

use learnup::api::ApiClient;
use learnup::config;
use learnup::error::AppResult;
use learnup::model::entity::{PassedExam, QuestionKind};
use learnup::quiz::{
    Finished, QuizError, QuizOutcome, QuizSession, QuizTimer, Recovery, ResultReview, Screen,
    Selection, SharedSession, TimerExit, persist_shared,
};
use learnup::utils::signal::cancel_on_ctrl_c;
use tokio_util::sync::CancellationToken;

use crate::prompt::{self, StdinLines};

const HELP: &str = "answer: <number>   next: n   previous: p   time: t   submit: s   quit: q";

pub async fn take(client: ApiClient, course_id: i64, defaults: config::Quiz) -> AppResult<()> {
    let session = match QuizSession::start(&client, course_id, defaults).await {
        Ok(session) => session,
        Err(e) => {
            print_recovery(&e);
            return Ok(());
        }
    };

    let shared = session.into_shared();
    let backend = Arc::new(client);
    let mut timer = QuizTimer::spawn(shared.clone(), backend.clone());

    let teardown = CancellationToken::new();
    let _stop_signal_task = teardown.clone().drop_guard();
    tokio::spawn(cancel_on_ctrl_c(teardown.clone()));

    let mut lines = prompt::stdin_lines();
    println!("{HELP}");
    print_question(&*shared.lock().await);

    loop {
        tokio::select! {
            _ = teardown.cancelled() => {
                return leave(&mut timer, &shared, backend.as_ref(), &mut lines).await;
            }
            exit = timer.wait() => {
                if let TimerExit::Expired { outcome, persisted } = exit? {
                    println!("\nTime is up!");
                    let finished = Finished { outcome, persisted };
                    report_finished(&shared, backend.as_ref(), &mut lines, finished).await?;
                }
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return leave(&mut timer, &shared, backend.as_ref(), &mut lines).await;
                };

                match line.trim() {
                    "" => {}
                    "q" => return leave(&mut timer, &shared, backend.as_ref(), &mut lines).await,
                    "s" => {
                        let finished = timer.submit(&shared, backend.as_ref()).await?;
                        return report_finished(&shared, backend.as_ref(), &mut lines, finished).await;
                    }
                    cmd => {
                        let mut s = shared.lock().await;
                        match cmd {
                            "n" => { s.next(); }
                            "p" => { s.previous(); }
                            "t" => {
                                println!("{} left", format_time(s.time_remaining_seconds()));
                                continue;
                            }
                            other => match other.parse::<usize>() {
                                Ok(n) => {
                                    let question = s.current_question();
                                    let picked = n
                                        .checked_sub(1)
                                        .and_then(|i| question.answers().get(i))
                                        .map(|a| (question.id(), a.id()));
                                    match picked {
                                        Some((qid, aid)) => {
                                            if let Err(e) = s.select_answer(qid, aid) {
                                                print_recovery(&e);
                                            }
                                        }
                                        None => println!("No answer #{n}."),
                                    }
                                }
                                Err(_) => {
                                    println!("{HELP}");
                                    continue;
                                }
                            },
                        }
                        print_question(&s);
                    }
                }
            }
        }
    }
}

/// Stops the countdown and leaves. If the clock ran out in the meantime the
/// attempt is already submitted, so its save is seen through first.
async fn leave(
    timer: &mut QuizTimer,
    shared: &SharedSession,
    client: &ApiClient,
    lines: &mut StdinLines,
) -> AppResult<()> {
    timer.cancel();
    match timer.wait().await? {
        TimerExit::Expired { outcome, persisted } => {
            println!("\nTime is up!");
            report_finished(shared, client, lines, Finished { outcome, persisted }).await
        }
        TimerExit::Cancelled | TimerExit::SubmittedManually => {
            println!("Quiz abandoned, nothing was saved.");
            Ok(())
        }
    }
}

async fn report_finished(
    shared: &SharedSession,
    client: &ApiClient,
    lines: &mut StdinLines,
    finished: Finished,
) -> AppResult<()> {
    print_outcome(&finished.outcome);
    match finished.persisted {
        Ok(passed) => print_saved(&passed),
        Err(e) => save_with_retry(shared, client, lines, e).await?,
    }
    Ok(())
}

/// Keeps offering to save again while the attempt can still be stored,
/// signing in again once the session has run out.
async fn save_with_retry(
    shared: &SharedSession,
    client: &ApiClient,
    lines: &mut StdinLines,
    mut error: QuizError,
) -> AppResult<()> {
    let mut client = client.clone();
    loop {
        print_recovery(&error);
        match error.recovery() {
            Recovery::Banner { retryable: true, .. } => {
                let answer = prompt::ask(lines, "Retry saving? [y/N] ").await?;
                if !answer.eq_ignore_ascii_case("y") {
                    println!("Result not saved.");
                    return Ok(());
                }
            }
            Recovery::SignIn { .. } => {
                let email = prompt::ask(lines, "Email (empty to give up): ").await?;
                if email.is_empty() {
                    println!("Result not saved.");
                    return Ok(());
                }
                let password = prompt::password(lines).await?;
                match client.login(&email, &password).await {
                    Ok(session) => client = client.with_session(session),
                    Err(e) => {
                        error = QuizError::Api(e);
                        continue;
                    }
                }
            }
            Recovery::Banner { .. } | Recovery::Redirect { .. } => return Ok(()),
        }

        match persist_shared(shared, &client).await {
            Ok(passed) => {
                print_saved(&passed);
                return Ok(());
            }
            Err(e) => error = e,
        }
    }
}

fn print_question(s: &QuizSession) {
    let question = s.current_question();
    let selection = s.selection(question.id());
    let hint = match question.kind() {
        QuestionKind::Single => "pick one",
        QuestionKind::Multiple => "pick all that apply",
    };

    println!(
        "\n[{}/{}] {} ({hint})   {} left",
        s.current_question_index() + 1,
        s.question_count(),
        question.text(),
        format_time(s.time_remaining_seconds())
    );
    for (i, answer) in question.answers().iter().enumerate() {
        let mark = if selection.is_some_and(|sel: &Selection| sel.contains(answer.id())) {
            "x"
        } else {
            " "
        };
        println!("  [{mark}] {}. {}", i + 1, answer.text());
    }
}

fn print_outcome(outcome: &QuizOutcome) {
    println!(
        "Score: {}% ({}/{} correct), {}% required: {}",
        outcome.score(),
        outcome.correct(),
        outcome.total(),
        outcome.required_score(),
        if outcome.passed() { "passed" } else { "failed" }
    );
}

fn print_saved(passed: &PassedExam) {
    println!("Result saved as attempt #{}.", passed.id());
}

pub fn print_recovery(error: &QuizError) {
    match error.recovery() {
        Recovery::Banner { message, .. } | Recovery::SignIn { message } => {
            eprintln!("! {message}")
        }
        Recovery::Redirect { to, message } => {
            let target = match to {
                Screen::CourseList => String::from("learnup course list"),
                Screen::Course { course_id } => format!("learnup course show --id {course_id}"),
            };
            eprintln!("{message}\nSee `{target}`.");
        }
    }
}

pub fn print_review(review: &ResultReview) {
    println!(
        "{}: {}% ({}% required) {}",
        review.exam_title(),
        review.score(),
        review.required_score(),
        if review.passed() { "passed" } else { "failed" }
    );
    if let Some(at) = review.passed_exam().created_at() {
        println!("Taken {}", at.format("%Y-%m-%d %H:%M"));
    }
    for (i, row) in review.rows().iter().enumerate() {
        println!(
            "\n{}. {} [{}]",
            i + 1,
            row.question,
            if row.is_correct { "correct" } else { "wrong" }
        );
        if row.chosen.is_empty() {
            println!("   your answer: (none)");
        } else {
            println!("   your answer: {}", row.chosen.join(", "));
        }
        if !row.is_correct {
            println!("   correct: {}", row.correct.join(", "));
        }
    }
}

fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
