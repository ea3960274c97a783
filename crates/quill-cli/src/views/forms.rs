use quill_model::User;
use quill_validate::{AuthField, ErrorMap};
use quill_wizard::FormOrchestrator;

/// Header and current messages of the wizard's current step.
pub fn render_step(form: &FormOrchestrator) -> String {
    let view = form.current_view();
    let header = format!(
        "Step {} of {}: {}\n",
        form.current_step(),
        form.step_count(),
        view.title()
    );
    let messages = form
        .errors()
        .iter()
        .map(|(field, message)| format!("  ! {}: {message}\n", field.label()));
    std::iter::once(header).chain(messages).collect()
}

pub fn render_auth_errors(errors: &ErrorMap<AuthField>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {message}\n", field.label()))
        .collect()
}

pub fn render_user(user: &User) -> String {
    format!("{} <{}> (id {})", user.name, user.email, user.id)
}
