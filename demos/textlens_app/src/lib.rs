use textlens::prelude::*;

fn length(state: &TextState) -> impl View {
    p(state.length()).class("length")
}

fn text_input(state: &'static TextState) -> impl View {
    input(state.text(), move |e: &OnInput| {
        state.set_text(e.current_target().value());
    })
    .class("input")
}

fn uppercase(state: &TextState) -> impl View + '_ {
    p(state.uppercase())
}

fn app(state: &'static TextState) -> impl View {
    div(div((length(state), text_input(state), uppercase(state))).class("container")).class("app")
}

textlens::start!(TextState::new(), app);
