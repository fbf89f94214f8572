use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    kpkg completions --shell bash > ~/.bash_completion.d/kpkg\n\n\
                  Generate zsh completions:\n    kpkg completions --shell zsh > ~/.zfunc/_kpkg\n\n\
                  Generate fish completions:\n    kpkg completions --shell fish > ~/.config/fish/completions/kpkg.fish\n\n\
                  Generate PowerShell completions:\n    kpkg completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: Shell,
}
