use maud::{html, Markup};

use super::layout::{layout, Flash};

pub fn login_page(message: Option<Flash<'_>>) -> Markup {
    layout(
        "Log in",
        None,
        message,
        html! {
            section class="auth-form" {
                h1 { "Log in" }
                form method="post" action="/login" {
                    label for="username" { "Username" }
                    input id="username" type="text" name="username" required;
                    label for="password" { "Password" }
                    input id="password" type="password" name="password" required;
                    button type="submit" { "Log in" }
                }
                p { "No account yet? " a href="/register" { "Register" } }
            }
        },
    )
}

pub fn register_page(message: Option<Flash<'_>>) -> Markup {
    layout(
        "Register",
        None,
        message,
        html! {
            section class="auth-form" {
                h1 { "Create an account" }
                form method="post" action="/register" {
                    label for="username" { "Username" }
                    input id="username" type="text" name="username" required;
                    label for="email" { "Email" }
                    input id="email" type="email" name="email" required;
                    label for="password" { "Password" }
                    input id="password" type="password" name="password" minlength="6" required;
                    label for="confirm_password" { "Confirm password" }
                    input id="confirm_password" type="password" name="confirm_password" required;
                    button type="submit" { "Register" }
                }
                p { "Already registered? " a href="/login" { "Log in" } }
            }
        },
    )
}
